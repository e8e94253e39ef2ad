//! Line-text format: one string per line

use std::ops::{Add, Bound, Mul, RangeBounds};

use filedata_fs::{NormalizedPath, io};

use crate::data::FileData;
use crate::error::{Error, Result};
use crate::format::{FileFormat, TextRoundTrip};

/// Line-text files (`.txt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Txt;

/// Line-text file data.
pub type TxtData = FileData<Txt>;

impl FileFormat for Txt {
    const NAME: &'static str = "txt";
    const EXT: &'static str = ".txt";

    type Data = Vec<String>;
    type Options = ();

    fn default_data() -> Self::Data {
        Vec::new()
    }

    fn load_raw(path: &NormalizedPath, _options: &()) -> Result<Self::Data> {
        let text = io::read_text(path)?;
        if !text.is_empty() && !text.ends_with('\n') {
            return Err(Error::format(path, Self::NAME, "last line is not terminated"));
        }
        Ok(text.lines().map(str::to_string).collect())
    }

    fn save_raw(data: &Self::Data, path: &NormalizedPath, _options: &()) -> Result<()> {
        io::write_text(path, &render_lines(data))?;
        Ok(())
    }

    fn normalize(data: Self::Data) -> Result<Self::Data> {
        Ok(split_lines(data))
    }
}

impl TextRoundTrip for Txt {}

/// Split on `\n` and drop carriage returns at line ends, so every line
/// reads back from disk unchanged.
fn split_lines(lines: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = Vec::new();
    for line in lines {
        if line.contains(['\n', '\r']) {
            out.extend(
                line.split('\n')
                    .map(|part| part.trim_end_matches('\r').to_string()),
            );
        } else {
            out.push(line);
        }
    }
    out
}

fn render_lines(lines: &[String]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Resolve a range against `len`, failing when it reaches past the end.
fn resolve_range(range: impl RangeBounds<usize>, len: usize) -> Result<std::ops::Range<usize>> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e + 1,
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    if end > len {
        return Err(Error::IndexOutOfRange { index: end, len });
    }
    if start > end {
        return Err(Error::IndexOutOfRange { index: start, len });
    }
    Ok(start..end)
}

impl FileData<Txt> {
    /// Build line data from text. The final line terminator is optional.
    pub fn parse(text: &str) -> Self {
        Self::from_normalized(split_lines(text.lines().map(str::to_string)))
    }

    /// Every line followed by `\n`.
    pub fn render(&self) -> String {
        render_lines(self.data_ref())
    }

    pub fn len(&self) -> usize {
        self.data_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_ref().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<String> {
        self.data_ref().get(index).cloned()
    }

    pub fn first(&self) -> Option<String> {
        self.data_ref().first().cloned()
    }

    pub fn last(&self) -> Option<String> {
        self.data_ref().last().cloned()
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Result<Vec<String>> {
        let range = resolve_range(range, self.len())?;
        Ok(self.data_ref()[range].to_vec())
    }

    /// Replace the line at `index`. A line containing `\n` is spliced in
    /// as several lines.
    pub fn set(&mut self, index: usize, line: impl Into<String>) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.data_mut()
            .splice(index..=index, split_lines([line.into()]));
        Ok(())
    }

    /// Replace `range` with `lines`, returning the removed lines.
    pub fn splice<I>(&mut self, range: impl RangeBounds<usize>, lines: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let range = resolve_range(range, self.len())?;
        let lines = split_lines(lines.into_iter().map(Into::into));
        Ok(self.data_mut().splice(range, lines).collect())
    }

    pub fn insert(&mut self, index: usize, line: impl Into<String>) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.splice(index..index, [line.into()]).map(|_| ())
    }

    pub fn remove(&mut self, index: usize) -> Result<String> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(self.data_mut().remove(index))
    }

    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) -> Result<Vec<String>> {
        let range = resolve_range(range, self.len())?;
        Ok(self.data_mut().drain(range).collect())
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let lines = split_lines([line.into()]);
        self.data_mut().extend(lines);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.data_mut().pop()
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let lines = split_lines(lines.into_iter().map(Into::into));
        self.data_mut().extend(lines);
    }

    pub fn clear(&mut self) {
        self.data_mut().clear();
    }

    /// A new value holding these lines followed by `other`'s.
    pub fn concat(&self, other: &Self) -> Self {
        let mut lines = self.data();
        lines.extend(other.data_ref().iter().cloned());
        Self::from_normalized(lines)
    }

    /// A new value holding these lines `n` times over.
    pub fn repeat(&self, n: usize) -> Self {
        let lines = self.data_ref();
        Self::from_normalized(lines.iter().cycle().take(lines.len() * n).cloned().collect())
    }

    /// Iterate over a snapshot of the lines.
    pub fn iter(&self) -> std::vec::IntoIter<String> {
        self.data().into_iter()
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.data_ref().iter().any(|l| l == line)
    }
}

impl Add for &FileData<Txt> {
    type Output = FileData<Txt>;

    fn add(self, other: Self) -> FileData<Txt> {
        self.concat(other)
    }
}

impl Add for FileData<Txt> {
    type Output = FileData<Txt>;

    fn add(self, other: Self) -> FileData<Txt> {
        self.concat(&other)
    }
}

impl Mul<usize> for &FileData<Txt> {
    type Output = FileData<Txt>;

    fn mul(self, n: usize) -> FileData<Txt> {
        self.repeat(n)
    }
}

impl Mul<usize> for FileData<Txt> {
    type Output = FileData<Txt>;

    fn mul(self, n: usize) -> FileData<Txt> {
        self.repeat(n)
    }
}

impl<S: Into<String>> FromIterator<S> for FileData<Txt> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_normalized(split_lines(iter.into_iter().map(Into::into)))
    }
}

impl IntoIterator for FileData<Txt> {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_data().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn lines(items: &[&str]) -> TxtData {
        items.iter().copied().collect()
    }

    #[test]
    fn test_normalize_splits_embedded_newlines() {
        let data = TxtData::new(vec!["a\nb".into(), "c".into(), "d\n".into()]).unwrap();
        assert_eq!(data.data(), vec!["a", "b", "c", "d", ""]);
    }

    #[test]
    fn test_normalize_drops_carriage_returns_at_line_ends() {
        let data = TxtData::new(vec!["a\r".into(), "b\r\nc".into(), "d\re".into()]).unwrap();
        assert_eq!(data.data(), vec!["a", "b", "c", "d\re"]);
        assert_eq!(TxtData::new(data.data()).unwrap(), data);
    }

    #[test]
    fn test_parse_accepts_missing_final_terminator() {
        assert_eq!(TxtData::parse("x\ny").data(), vec!["x", "y"]);
        assert_eq!(TxtData::parse("x\ny\n").data(), vec!["x", "y"]);
        assert!(TxtData::parse("").is_empty());
    }

    #[test]
    fn test_render_terminates_every_line() {
        assert_eq!(lines(&["a", "", "b"]).render(), "a\n\nb\n");
        assert_eq!(TxtData::default().render(), "");
    }

    #[test]
    fn test_set_splices_multiline() {
        let mut data = lines(&["a", "b", "c"]);
        data.set(1, "x\ny").unwrap();
        assert_eq!(data.data(), vec!["a", "x", "y", "c"]);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut data = lines(&["a"]);
        let err = data.set(1, "b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Key);
    }

    #[test]
    fn test_remove_and_pop() {
        let mut data = lines(&["a", "b", "c"]);
        assert_eq!(data.remove(0).unwrap(), "a");
        assert_eq!(data.pop(), Some("c".to_string()));
        assert_eq!(data.data(), vec!["b"]);
        assert!(data.remove(5).is_err());
    }

    #[test]
    fn test_slice_and_ranges() {
        let mut data = lines(&["a", "b", "c", "d"]);
        assert_eq!(data.slice(1..3).unwrap(), vec!["b", "c"]);
        assert_eq!(data.slice(..).unwrap().len(), 4);
        assert!(data.slice(2..9).is_err());

        assert_eq!(data.remove_range(..2).unwrap(), vec!["a", "b"]);
        assert_eq!(data.data(), vec!["c", "d"]);
    }

    #[test]
    fn test_splice_normalizes_inserted_lines() {
        let mut data = lines(&["a", "b"]);
        let removed = data.splice(0..1, ["x\ny"]).unwrap();
        assert_eq!(removed, vec!["a"]);
        assert_eq!(data.data(), vec!["x", "y", "b"]);
    }

    #[test]
    fn test_insert_at_end() {
        let mut data = lines(&["a"]);
        data.insert(1, "b").unwrap();
        assert_eq!(data.data(), vec!["a", "b"]);
        assert!(data.insert(5, "c").is_err());
    }

    #[test]
    fn test_concat_and_repeat() {
        let a = lines(&["a"]);
        let b = lines(&["b"]);
        assert_eq!((&a + &b).data(), vec!["a", "b"]);
        assert_eq!((&a * 3).data(), vec!["a", "a", "a"]);
        assert!((&a * 0).is_empty());
        // operands untouched
        assert_eq!(a.data(), vec!["a"]);
    }

    #[test]
    fn test_iter_is_snapshot() {
        let mut data = lines(&["a", "b"]);
        let iter = data.iter();
        data.push("c");
        assert_eq!(iter.collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(data.len(), 3);
    }
}
