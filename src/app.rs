use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::system::clock::{Clock, MonotonicClock};
use crate::system::collector::Collector;
use crate::system::history::SeriesHistory;
use crate::system::platform::{CounterSource, NativeSource};
use crate::system::snapshot::TickView;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub help: KeyCode,
    pub cycle_theme: KeyCode,
    pub toggle_per_core: KeyCode,
    pub refresh: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            toggle_per_core: parse_key(&kb.toggle_per_core).unwrap_or(KeyCode::Char('c')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.help), "Toggle help"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.toggle_per_core), "Toggle per-core bars"),
            (key_label(self.refresh), "Sample now"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

pub struct App<S = NativeSource, C = MonotonicClock> {
    pub running: bool,
    pub collector: Collector<S, C>,
    pub view: TickView,
    pub history: SeriesHistory,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub show_per_core: bool,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(config: Config) -> Self {
        let filter = config.disks.mount_filter();
        let collector = Collector::new()
            .top_processes(config.general.top_processes)
            .mount_filter(move |mount| filter.matches(mount));
        Self::with_collector(config, collector)
    }
}

impl<S, C> App<S, C> {
    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }
}

impl<S: CounterSource, C: Clock> App<S, C> {
    /// Builds the app around an existing collector and takes the first sample.
    ///
    /// The first tick has no baseline, so every rate in it reads zero.
    pub fn with_collector(config: Config, mut collector: Collector<S, C>) -> Self {
        let view = collector.refresh();
        let mut history = SeriesHistory::new(config.general.history_length);
        history.record(&view);

        App {
            running: true,
            collector,
            view,
            history,
            input_mode: InputMode::Normal,
            theme: Theme::from_name(&config.colors.theme),
            show_per_core: config.general.show_per_core,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        }
    }

    pub fn refresh_data(&mut self) {
        self.view = self.collector.refresh();
        self.history.record(&self.view);
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.toggle_per_core {
            return Action::TogglePerCore;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => {
                self.input_mode = match self.input_mode {
                    InputMode::Help => InputMode::Normal,
                    InputMode::Normal => InputMode::Help,
                };
            }
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::TogglePerCore => self.show_per_core = !self.show_per_core,
            Action::Refresh => self.refresh_data(),
            Action::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::system::counters::{
        BatteryState, CpuSample, CpuTimes, DiskSample, HostInfo, MemorySample, NetworkSample,
        ProcessSample,
    };

    /// Each read advances the counters by a fixed step.
    #[derive(Default)]
    struct SteppingSource {
        reads: Cell<u64>,
    }

    impl CounterSource for SteppingSource {
        fn cpu_times(&self) -> CpuTimes {
            let n = self.reads.get() + 1;
            self.reads.set(n);
            CpuTimes {
                aggregate: Some(CpuSample {
                    total: n * 100,
                    active: n * 25,
                }),
                cores: vec![Some(CpuSample {
                    total: n * 100,
                    active: n * 25,
                })],
            }
        }

        fn memory(&self) -> MemorySample {
            MemorySample {
                total: 1000,
                free: 500,
                buffers: 0,
                cached: 0,
            }
        }

        fn disks(&self, _include: &dyn Fn(&str) -> bool) -> Vec<DiskSample> {
            Vec::new()
        }

        fn network(&self) -> Option<NetworkSample> {
            None
        }

        fn battery(&self) -> Option<BatteryState> {
            None
        }

        fn temperature(&self) -> Option<f32> {
            None
        }

        fn processes(&self) -> Vec<ProcessSample> {
            Vec::new()
        }

        fn host(&self) -> HostInfo {
            HostInfo::default()
        }
    }

    struct StepClock {
        start: Instant,
        ticks: Cell<u32>,
    }

    impl Clock for StepClock {
        fn now(&self) -> Instant {
            let n = self.ticks.get();
            self.ticks.set(n + 1);
            self.start + Duration::from_secs(n.into())
        }
    }

    fn make_test_app() -> App<SteppingSource, StepClock> {
        let clock = StepClock {
            start: Instant::now(),
            ticks: Cell::new(0),
        };
        let collector = Collector::with_source(SteppingSource::default(), clock);
        App::with_collector(Config::default(), collector)
    }

    #[test]
    fn first_sample_reads_zero_then_measures() {
        let mut app = make_test_app();
        assert_eq!(app.view.cpu.aggregate_percent, 0.0);
        app.refresh_data();
        assert_eq!(app.view.cpu.aggregate_percent, 25.0);
        assert_eq!(app.view.cpu.per_core_percent, vec![25.0]);
        assert_eq!(app.history.cpu.tail(10), vec![0, 25]);
    }

    #[test]
    fn refresh_action_takes_a_sample() {
        let mut app = make_test_app();
        app.dispatch(Action::Refresh);
        assert_eq!(app.history.cpu.len(), 2);
    }

    #[test]
    fn default_keybinds() {
        let app = make_test_app();

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::CycleTheme);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::TogglePerCore);

        // Ctrl+C always quits
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);
    }

    #[test]
    fn custom_keybind_remap_works() {
        let mut app = make_test_app();
        app.keybinds.quit = KeyCode::Char('x');

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = make_test_app();

        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help());

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        // Ctrl+C still works (safety)
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);

        app.dispatch(Action::ToggleHelp);
        assert!(!app.show_help());
    }

    #[test]
    fn toggles_update_state() {
        let mut app = make_test_app();
        assert!(app.show_per_core);
        app.dispatch(Action::TogglePerCore);
        assert!(!app.show_per_core);

        assert_eq!(app.theme.name, "dark");
        app.dispatch(Action::CycleTheme);
        assert_eq!(app.theme.name, "light");

        app.dispatch(Action::Quit);
        assert!(!app.running);
    }
}
