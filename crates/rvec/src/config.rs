use std::{
    ffi::OsString,
    path::PathBuf,
};

use rvec_error::{AnyError, Context};

use crate::dump::DEFAULT_PATH;

pub const USAGE: &str = "usage: rvec [--arena <bytes>] [demo | reserve <capacity>...] | rvec dump [path]";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reserve 2, then 1, on an `i32` vector.
    Demo,
    Reserve(Vec<usize>),
    Dump(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub command: Command,
    /// Draw vector memory from an arena of this many bytes instead of the
    /// global allocator.
    pub arena: Option<usize>,
}

impl RunConfig {

    /// Parses the arguments following the program name.
    pub fn from_args<I>(args: I) -> rvec_error::Result<Self>
        where
            I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter().peekable();
        let mut arena = None;
        if args.next_if(|arg| arg == "--arena").is_some() {
            let size = args
                .next()
                .ok_or_else(|| AnyError::just_context("--arena needs a size in bytes"))?;
            arena = Some(parse_arena_size(&size)?);
        }
        let command = match args.next() {
            None => Command::Demo,
            Some(arg) => match arg.to_str() {
                Some("demo") => Command::Demo,
                Some("reserve") => {
                    let capacities = args
                        .by_ref()
                        .map(|arg| parse_capacity(&arg))
                        .collect::<rvec_error::Result<Vec<_>>>()?;
                    if capacities.is_empty() {
                        return Err(AnyError::just_context("reserve needs at least one capacity"))
                    }
                    Command::Reserve(capacities)
                },
                Some("dump") => {
                    Command::Dump(args.next().map_or_else(|| PathBuf::from(DEFAULT_PATH), PathBuf::from))
                },
                _ => {
                    return Err(AnyError::just_context(
                        format!("unknown command '{}'", arg.to_string_lossy())
                    ))
                },
            },
        };
        if let Some(extra) = args.next() {
            return Err(AnyError::just_context(
                format!("unexpected argument '{}'", extra.to_string_lossy())
            ))
        }
        if arena.is_some() && matches!(command, Command::Dump(_)) {
            return Err(AnyError::just_context("--arena does not apply to dump"))
        }
        Ok(Self { command, arena })
    }
}

fn parse_capacity(arg: &OsString) -> rvec_error::Result<usize> {
    let text = arg.to_string_lossy();
    text.trim()
        .parse::<usize>()
        .ctx_err_with(|| format!("invalid capacity '{}'", text))
}

fn parse_arena_size(arg: &OsString) -> rvec_error::Result<usize> {
    let text = arg.to_string_lossy();
    let size = text.trim()
        .parse::<usize>()
        .ctx_err_with(|| format!("invalid arena size '{}'", text))?;
    if size == 0 {
        return Err(AnyError::just_context("arena size must be positive"))
    }
    Ok(size)
}
