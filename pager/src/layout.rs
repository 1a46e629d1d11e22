/// One laid-out menu cell.
///
/// `index` addresses the controller's [`crate::MenuWindow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuCell {
    pub index: usize,
    /// Start offset along the menu axis (includes the start inset).
    pub start: u64,
    pub width: u32,
    pub height: u32,
    pub is_selected: bool,
}

impl MenuCell {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.width as u64)
    }
}

/// Frame of the selection indicator along the menu axis.
///
/// While scrolling it moves between the `from` and `to` cells according to the progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorFrame {
    pub start: u64,
    pub width: u32,
}

impl IndicatorFrame {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.width as u64)
    }
}

pub(crate) fn lerp_u32(from: u32, to: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let v = from as f32 + (to as f32 - from as f32) * t;
    v.max(0.0) as u32
}

pub(crate) fn lerp_u64(from: u64, to: u64, t: f32) -> u64 {
    let t = t.clamp(0.0, 1.0);
    let v = from as f64 + (to as f64 - from as f64) * t as f64;
    v.max(0.0) as u64
}
