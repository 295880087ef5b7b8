use indicatif::{ProgressBar, ProgressStyle};
use nu_ansi_term::{Color, Style};
use std::fmt::Display;
use std::io::IsTerminal;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Theme {
    Auto,
    Light,
    Dark,
    Plain,
}

/// Human-facing output: headings, aligned rows, notices and a spinner.
///
/// Machine-readable output (edge lines, JSON) bypasses this type.
pub struct Ui {
    palette: Palette,
    paint: bool,
    quiet: bool,
}

impl Ui {
    pub fn new(theme: Theme, quiet: bool) -> Self {
        let paint = theme != Theme::Plain && !quiet && std::io::stdout().is_terminal();

        #[cfg(windows)]
        if paint {
            let _ = nu_ansi_term::enable_ansi_support();
        }

        let palette = match theme {
            Theme::Plain => Palette::plain(),
            Theme::Light => Palette::light(),
            Theme::Dark | Theme::Auto => Palette::dark(),
        };
        Self {
            palette,
            paint,
            quiet,
        }
    }

    /// Prints aligned `key: value` rows under a heading.
    pub fn section<'a, I, V>(&self, title: &str, rows: I)
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Display,
    {
        let rows: Vec<(&str, String)> = rows
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        if rows.is_empty() {
            return;
        }
        self.heading(title);
        let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in rows {
            let key = format!("{key:>width$}:");
            println!(
                "  {} {}",
                self.style(self.palette.key, &key),
                self.style(self.palette.value, &value)
            );
        }
    }

    /// Prints a titled list; nothing when `entries` is empty.
    pub fn list<I>(&self, title: &str, entries: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return;
        }
        self.heading(title);
        for entry in entries {
            println!("  {} {entry}", self.style(self.palette.accent, "-"));
        }
    }

    pub fn success(&self, message: &str) {
        self.notice(self.palette.success, "ok", message, false);
    }

    pub fn warn(&self, message: &str) {
        self.notice(self.palette.warn, "warning", message, true);
    }

    /// Starts a spinner on stderr; it is cleared when the guard drops.
    pub fn task(&self, label: &str) -> TaskGuard {
        let pb = (!self.quiet && std::io::stderr().is_terminal()).then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
                pb.set_style(style);
            }
            pb.set_message(label.to_string());
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        });
        TaskGuard {
            start: Instant::now(),
            pb,
        }
    }

    fn notice(&self, style: Style, tag: &str, message: &str, to_stderr: bool) {
        let line = if self.quiet {
            message.to_string()
        } else {
            format!("{} {message}", self.style(style, &format!("{tag}:")))
        };
        if to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn heading(&self, title: &str) {
        if self.quiet {
            println!("{title}");
        } else {
            println!("{}", self.style(self.palette.heading, &format!("== {title}")));
        }
    }

    fn style(&self, style: Style, text: &str) -> String {
        if self.paint {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

pub struct TaskGuard {
    start: Instant,
    pb: Option<ProgressBar>,
}

impl TaskGuard {
    pub fn finish(mut self) -> Duration {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
        self.start.elapsed()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }
}

#[derive(Clone, Copy)]
struct Palette {
    heading: Style,
    key: Style,
    value: Style,
    accent: Style,
    success: Style,
    warn: Style,
}

impl Palette {
    fn dark() -> Self {
        Self {
            heading: Style::new().fg(Color::Purple).bold(),
            key: Style::new().fg(Color::LightBlue).bold(),
            value: Style::new().fg(Color::White),
            accent: Style::new().fg(Color::LightBlue),
            success: Style::new().fg(Color::LightGreen).bold(),
            warn: Style::new().fg(Color::Yellow).bold(),
        }
    }

    fn light() -> Self {
        Self {
            heading: Style::new().fg(Color::Blue).bold(),
            key: Style::new().fg(Color::Black).bold(),
            value: Style::new().fg(Color::Black),
            accent: Style::new().fg(Color::Blue),
            success: Style::new().fg(Color::Green).bold(),
            warn: Style::new().fg(Color::Red).bold(),
        }
    }

    fn plain() -> Self {
        Self {
            heading: Style::new(),
            key: Style::new(),
            value: Style::new(),
            accent: Style::new(),
            success: Style::new(),
            warn: Style::new(),
        }
    }
}
