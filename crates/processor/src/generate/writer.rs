/// Line-oriented text buffer with space indentation.
#[derive(Default)]
pub(crate) struct SourceWriter {
	buf: String,
}

impl SourceWriter {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn line(&mut self, indent: usize, text: impl AsRef<str>) {
		self.buf.extend(std::iter::repeat_n(' ', indent));
		self.buf.push_str(text.as_ref());
		self.buf.push('\n');
	}

	pub(crate) fn blank(&mut self) {
		self.buf.push('\n');
	}

	pub(crate) fn finish(self) -> String {
		self.buf
	}
}
