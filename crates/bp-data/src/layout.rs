//! Column-major reflow of formatted reading strings.
//!
//! A long vertical list of readings is rendered as several side-by-side
//! vertical blocks, like a multi-column printed page. The buffer is kept
//! flat; rows are assembled by index arithmetic over contiguous blocks
//! rather than by building nested per-column lists.

/// Fixed spacer between adjacent columns.
const SPACER: &str = "  ";

/// Buffers formatted entries for one section and reflows them on flush.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: usize,
    buffer: Vec<String>,
}

impl ColumnLayout {
    /// Create a layout with `columns` columns, clamped to at least 1.
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            buffer: Vec::new(),
        }
    }

    /// Append one formatted entry to the buffer.
    pub fn push(&mut self, entry: String) {
        self.buffer.push(entry);
    }

    /// Number of buffered entries awaiting layout.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Reflow the buffer into rendered rows and clear it.
    ///
    /// With N entries and C columns the buffer is padded with blank filler
    /// entries to a multiple of C, then read column-major: it is sliced into
    /// C contiguous blocks of `rows = N_padded / C` entries, and row *i*
    /// gathers the *i*-th entry of every block. Emits `ceil(N / C)` rows.
    pub fn flush(&mut self) -> Vec<String> {
        if self.buffer.is_empty() {
            return Vec::new();
        }

        // Filler matches the widest buffered entry so columns stay aligned.
        let width = self.buffer.iter().map(|s| s.len()).max().unwrap_or(0);
        let filler = " ".repeat(width);

        let remainder = self.buffer.len() % self.columns;
        if remainder != 0 {
            for _ in 0..(self.columns - remainder) {
                self.buffer.push(filler.clone());
            }
        }

        let rows = self.buffer.len() / self.columns;
        let mut rendered = Vec::with_capacity(rows);
        for i in 0..rows {
            let row = (0..self.columns)
                .map(|block| self.buffer[i + block * rows].as_str())
                .collect::<Vec<_>>()
                .join(SPACER);
            rendered.push(row.trim_end().to_string());
        }

        self.buffer.clear();
        rendered
    }
}
