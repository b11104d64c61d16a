// Line Stream - the machine-control program as exchanged with the host

/// Ordered sequence of G-code lines
///
/// Lines handed in by the host carry no terminator. Lines read back from the
/// work file keep theirs, the same way a "read lines" call returns them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStream {
    lines: Vec<String>,
}

impl LineStream {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Serialize for the work file: every line gets exactly one `\n` appended,
    /// even if it is empty or already ends in a newline.
    pub fn to_work_file_contents(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Split work file contents back into lines, keeping each `\n`.
    ///
    /// Universal newlines: `\r\n` and a bare `\r` both end a line and come
    /// back as `\n`. A trailing fragment without terminator is kept as its
    /// own line.
    pub fn from_work_file_contents(contents: &str) -> Self {
        let normalized = if contents.contains('\r') {
            contents.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            contents.to_owned()
        };

        Self {
            lines: normalized.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for LineStream {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl<'a> FromIterator<&'a str> for LineStream {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(str::to_owned).collect())
    }
}

impl FromIterator<String> for LineStream {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for LineStream {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}
