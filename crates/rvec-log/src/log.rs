use std::sync::{OnceLock, Mutex, MutexGuard};

use core::str::FromStr;

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use crate::*;

use fmt::SegmentSpec;

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Level {
    Always = -1,
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

pub struct Logger<W: WriteColor> {
    out: W,
    always_fmt: LogFmt,
    error_fmt: LogFmt,
    warn_fmt: LogFmt,
    info_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    filter: Filter,
}

impl<W: WriteColor> Logger<W> {

    pub fn new(out: W, filter: Filter) -> Self {
        let mut always_fmt = LogFmt::default();
        LogFmtBuilder::new(&mut always_fmt).message(|spec| spec);
        Self {
            out,
            always_fmt,
            error_fmt: LogFmt::labeled("error", Color::Red),
            warn_fmt: LogFmt::labeled("warn", Color::Yellow),
            info_fmt: LogFmt::labeled("info", Color::Green),
            debug_fmt: LogFmt::labeled("debug", Color::Blue),
            trace_fmt: LogFmt::labeled("trace", Color::Magenta),
            filter,
        }
    }

    #[inline(always)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn fmt_mut(&mut self, level: Level) -> &mut LogFmt {
        match level {
            Level::Always => &mut self.always_fmt,
            Level::Error => &mut self.error_fmt,
            Level::Warn => &mut self.warn_fmt,
            Level::Info => &mut self.info_fmt,
            Level::Debug => &mut self.debug_fmt,
            Level::Trace => &mut self.trace_fmt,
        }
    }

    pub fn set_fmt(&mut self, level: Level, mut f: impl FnMut(&mut LogFmtBuilder)) {
        let mut builder = LogFmtBuilder::new(self.fmt_mut(level));
        f(&mut builder);
    }

    /// Writes one line if `level` passes the filter for `target`.
    pub fn log(&mut self, target: &str, level: Level, msg: core::fmt::Arguments) -> Result<bool> {
        if !self.filter.enabled(target, level) {
            return Ok(false)
        }
        let fmt = match level {
            Level::Always => &self.always_fmt,
            Level::Error => &self.error_fmt,
            Level::Warn => &self.warn_fmt,
            Level::Info => &self.info_fmt,
            Level::Debug => &self.debug_fmt,
            Level::Trace => &self.trace_fmt,
        };
        for segment in fmt {
            match segment {
                SegmentSpec::Message(log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.out.set_color(color_spec)?;
                        write!(self.out, "{}", msg)?;
                        self.out.reset()?;
                    } else {
                        write!(self.out, "{}", msg)?;
                    }
                },
                SegmentSpec::Text(text, log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.out.set_color(color_spec)?;
                        self.out.write_all(text.as_bytes())?;
                        self.out.reset()?;
                    } else {
                        self.out.write_all(text.as_bytes())?;
                    }
                },
            }
        }
        self.out.write_all(b"\n")?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger<StandardStream>>> = OnceLock::new();

/// Installs the stderr logger with the filter from `RUST_LOG`.
///
/// Later calls are no-ops. Logging before `init` installs the same logger.
pub fn init() {
    init_with(Filter::from_env());
}

pub fn init_with(filter: Filter) {
    LOGGER.get_or_init(|| {
        Mutex::new(Logger::new(StandardStream::stderr(ColorChoice::Auto), filter))
    });
}

fn logger() -> Result<MutexGuard<'static, Logger<StandardStream>>> {
    LOGGER
        .get_or_init(|| {
            Mutex::new(Logger::new(StandardStream::stderr(ColorChoice::Auto), Filter::from_env()))
        })
        .lock()
        .map_err(|_| LogError::Poisoned)
}

pub fn set_fmt(level: Level, f: impl FnMut(&mut LogFmtBuilder)) -> Result<()> {
    logger()?.set_fmt(level, f);
    Ok(())
}

#[inline(always)]
pub fn log(target: &str, level: Level, args: core::fmt::Arguments) -> Result<bool> {
    logger()?.log(target, level, args)
}

#[macro_export]
macro_rules! always {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Always, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}
