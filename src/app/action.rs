/// A user intent, produced by key bindings and mouse hit regions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    TogglePlay,
    Next,
    Prev,
    Select(usize),
    /// Inline `▶` on a hovered row: select it, then start playback.
    PlayRow(usize),
    /// Inline `⏸` on a hovered row: select it, which leaves it paused.
    PauseRow(usize),
    Hover(Option<usize>),
    HoverNext,
    HoverPrev,
    SelectHovered,
    Quit,
}
