use core::{
    fmt::{self, Display, Debug, Formatter},
    error,
};

use compact_str::CompactString;

use crate::{Location, Tracked};

/// Description plus an optional boxed source error.
pub struct AnyError {
    desc: CompactString,
    err: Option<Box<dyn error::Error + Send + Sync>>,
    loc: Option<Location>,
}

impl AnyError {

    #[track_caller]
    pub fn new(desc: impl AsRef<str>, err: impl error::Error + Send + Sync + 'static) -> Self {
        Self {
            desc: CompactString::new(desc),
            err: Some(Box::new(err)),
            loc: Some(caller!()),
        }
    }

    #[track_caller]
    pub fn just_context(desc: impl AsRef<str>) -> Self {
        Self {
            desc: CompactString::new(desc),
            err: None,
            loc: Some(caller!()),
        }
    }

    #[inline(always)]
    pub fn description(&self) -> &str {
        &self.desc
    }
}

impl Debug for AnyError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.err {
            Some(err) => write!(f, "Error(ctx: {}, err: {:?})", self.desc, err),
            None => write!(f, "Error(ctx: {}, err: None)", self.desc),
        }
    }
}

impl Display for AnyError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.desc)
    }
}

impl error::Error for AnyError {

    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.err {
            Some(err) => Some(&**err),
            None => None,
        }
    }
}

impl Tracked for AnyError {

    fn location(&self) -> Option<Location> {
        self.loc
    }
}

/// Walks `err` and its sources, joining their messages with `": "`.
pub fn chain(err: &(dyn error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        out.push_str(": ");
        out.push_str(&err.to_string());
        source = err.source();
    }
    out
}
