// Character animation system

use crate::core::math::Rect;

use super::state::CharacterState;

/// A single animation strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "run", "attack")
    pub name: &'static str,
    /// Number of frames in the strip
    pub frame_count: usize,
    /// Delay between two frame advances in milliseconds
    pub frame_interval_ms: u64,
    /// Whether the animation wraps around; one-shot strips end on their last frame
    pub looping: bool,
}

impl AnimationClip {
    /// Create a looping animation
    pub const fn looping(name: &'static str, frame_count: usize, frame_interval_ms: u64) -> Self {
        Self {
            name,
            frame_count,
            frame_interval_ms,
            looping: true,
        }
    }

    /// Create a one-shot animation (plays once)
    pub const fn one_shot(name: &'static str, frame_count: usize, frame_interval_ms: u64) -> Self {
        Self {
            name,
            frame_count,
            frame_interval_ms,
            looping: false,
        }
    }

    /// Index of the final frame
    pub fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    /// Total duration of one pass through the strip
    pub fn total_duration_ms(&self) -> u64 {
        self.frame_count as u64 * self.frame_interval_ms
    }
}

/// Standard strips, indexed by [`CharacterState::index`]
const STANDARD_CLIPS: [AnimationClip; 6] = [
    AnimationClip::looping("idle", 13, 80),
    AnimationClip::looping("run", 10, 60),
    AnimationClip::one_shot("attack", 6, 50),
    AnimationClip::looping("jump", 10, 70),
    AnimationClip::one_shot("hurt", 3, 100),
    AnimationClip::one_shot("dead", 5, 120),
];

/// Get the animation strip played in a given state
pub fn clip_for(state: CharacterState) -> &'static AnimationClip {
    &STANDARD_CLIPS[state.index()]
}

/// Result of advancing an animation by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAdvance {
    /// Moved to the next frame (wrapping for looping strips)
    Advanced,
    /// A one-shot strip reached its last frame
    Finished,
}

/// Frame-timed playback position for one character
#[derive(Debug)]
pub struct AnimationPlayer {
    /// Current frame index within the active strip
    current_frame: usize,
    /// Clock reading of the last frame advance
    last_frame_time_ms: u64,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
}

impl AnimationPlayer {
    pub fn new(now_ms: u64) -> Self {
        Self {
            current_frame: 0,
            last_frame_time_ms: now_ms,
            flip_horizontal: false,
        }
    }

    /// Jump back to the first frame without touching the frame timer
    pub fn rewind(&mut self) {
        self.current_frame = 0;
    }

    /// Jump back to the first frame and restart the frame timer
    pub fn restart(&mut self, now_ms: u64) {
        self.current_frame = 0;
        self.last_frame_time_ms = now_ms;
    }

    /// Check whether enough time has passed to show the next frame
    pub fn is_due(&self, clip: &AnimationClip, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_frame_time_ms) >= clip.frame_interval_ms
    }

    /// Step to the next frame of `clip` and record `now_ms` as the advance time.
    ///
    /// One-shot strips report [`FrameAdvance::Finished`] once the step reaches
    /// or passes their last frame and stay parked on it.
    pub fn advance(&mut self, clip: &AnimationClip, now_ms: u64) -> FrameAdvance {
        let next = self.current_frame + 1;
        self.last_frame_time_ms = now_ms;

        if !clip.looping && next >= clip.last_frame() {
            self.current_frame = clip.last_frame();
            return FrameAdvance::Finished;
        }

        self.current_frame = next % clip.frame_count;
        FrameAdvance::Advanced
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Clock reading of the last frame advance
    pub fn last_frame_time_ms(&self) -> u64 {
        self.last_frame_time_ms
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    #[cfg(test)]
    pub(crate) fn set_frame(&mut self, frame: usize) {
        self.current_frame = frame;
    }
}

/// Data needed to render the current animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrameData {
    pub state: CharacterState,
    pub frame_index: usize,
    pub flip_horizontal: bool,
}

/// Layout of a character sprite sheet
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheetConfig {
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
}

impl SpriteSheetConfig {
    pub const fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
        }
    }

    /// One strip per sheet, 128x128 frames on a single row
    pub const fn standard_character() -> Self {
        Self::new(128, 128)
    }

    /// Source rectangle of a frame within its sheet
    pub fn frame_rect(&self, frame_index: usize) -> Rect {
        Rect::new(
            (frame_index as u32 * self.frame_width) as i32,
            0,
            self.frame_width,
            self.frame_height,
        )
    }
}
