use termcolor::{Color, ColorSpec};

use compact_str::CompactString;

/// Sequence of text and message segments making up one log line.
#[derive(Default, Clone)]
pub struct LogFmt {
    segments: Vec<SegmentSpec>,
}

impl LogFmt {

    /// `<label>: <message>` with the label in `color`.
    pub fn labeled(label: &str, color: Color) -> Self {
        let mut fmt = Self::default();
        LogFmtBuilder::new(&mut fmt)
            .text(label, |spec| spec.with_color_spec(|c| { c.set_fg(Some(color)).set_bold(true); }))
            .text(": ", |spec| spec)
            .message(|spec| spec);
        fmt
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = core::slice::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, mut f: impl FnMut(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

#[derive(Clone)]
pub enum SegmentSpec {
    Message(LogSpec),
    Text(CompactString, LogSpec),
}

pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    /// Clears `fmt` and starts building it anew.
    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn message(&mut self, mut f: impl FnMut(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Message(f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, mut f: impl FnMut(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_replaces_segments() {
        let mut fmt = LogFmt::labeled("info", Color::Green);
        assert_eq!(fmt.into_iter().count(), 3);
        LogFmtBuilder::new(&mut fmt).message(|spec| spec);
        let segments: Vec<_> = fmt.into_iter().collect();
        assert_eq!(segments.len(), 1);
        assert!(matches!(segments[0], SegmentSpec::Message(_)));
    }

    #[test]
    fn labeled_colors_label_only() {
        let fmt = LogFmt::labeled("warn", Color::Yellow);
        let mut iter = fmt.into_iter();
        match iter.next() {
            Some(SegmentSpec::Text(text, spec)) => {
                assert_eq!(text.as_str(), "warn");
                assert_eq!(spec.color_spec.as_ref().and_then(|c| c.fg()), Some(&Color::Yellow));
            },
            _ => panic!("expected label segment"),
        }
        match iter.next() {
            Some(SegmentSpec::Text(text, spec)) => {
                assert_eq!(text.as_str(), ": ");
                assert!(spec.color_spec.is_none());
            },
            _ => panic!("expected separator segment"),
        }
    }
}
