#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    CycleTheme,
    TogglePerCore,
    Refresh,
    None,
}
