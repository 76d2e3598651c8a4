use core::str::FromStr;

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use crate::Level;

/// Per-target maximum levels, in the `RUST_LOG` syntax.
///
/// `"debug"` sets the base level, `"rvec::dump=trace"` the level of one
/// module path and everything below it. Entries are comma separated and
/// unknown levels are ignored.
#[derive(Clone, Debug)]
pub struct Filter {
    target_levels: FxHashMap<CompactString, Level>,
    base_level: Level,
}

impl Default for Filter {

    fn default() -> Self {
        Self {
            target_levels: FxHashMap::default(),
            base_level: Level::Error,
        }
    }
}

impl Filter {

    pub fn from_env() -> Self {
        match std::env::var("RUST_LOG") {
            Ok(env) => Self::parse(&env),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(spec: &str) -> Self {
        let mut filter = Self::default();
        for arg in spec.split(',') {
            let (module, level) = match arg.find('=') {
                Some(j) => (Some(arg[0..j].trim()), arg[j+1..].trim()),
                None => (None, arg.trim()),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            match module {
                Some(module) => {
                    let entry = filter.target_levels
                        .entry(CompactString::new(module))
                        .or_insert(level);
                    *entry = (*entry).min(level);
                },
                None => filter.base_level = level,
            }
        }
        filter
    }

    #[inline(always)]
    pub fn base_level(&self) -> Level {
        self.base_level
    }

    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        level <= self.target_level(target)
    }
}
