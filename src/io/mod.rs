use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const BUFFER_SIZE:usize = 2048;

/// Iterator over signed 8-bit samples from any reader, paired with their sample index
pub struct BufferedSource<S: Read> {
	src: S,
	idx: usize,
	buffer: [u8; BUFFER_SIZE],
	buffer_idx: usize,
	buffer_valid_len: usize,
}

impl<S: Read> BufferedSource<S> {

	pub fn new(src:S) -> Self {
		Self { src, idx: 0, buffer: [0; BUFFER_SIZE], buffer_idx: 0, buffer_valid_len: 0 }
	}

	fn buffer_samples(&mut self) -> std::io::Result<()> {
		self.buffer_valid_len = self.src.read(&mut self.buffer)?;
		self.buffer_idx = 0;
		Ok(())
	}

	/// Collects up to `n` samples; fewer only at the end of the source
	pub fn take_block(&mut self, n:usize) -> Vec<i8> {
		self.by_ref().take(n).map(|(x, _)| x).collect()
	}

}

impl<S: Read> Iterator for BufferedSource<S> {
	type Item = (i8, usize);

	fn next(&mut self) -> Option<(i8, usize)> {
		if self.buffer_idx >= self.buffer_valid_len {
			// Out of buffered samples; a failed or empty read ends the stream
			match self.buffer_samples() {
				Ok(()) if self.buffer_valid_len > 0 => {},
				_ => return None,
			}
		}

		let ans = (self.buffer[self.buffer_idx] as i8, self.idx);
		self.idx += 1;
		self.buffer_idx += 1;
		Some(ans)
	}
}

pub fn file_source_i8<P: AsRef<Path>>(path:P) -> std::io::Result<BufferedSource<File>> {
	Ok(BufferedSource::new(File::open(path)?))
}
