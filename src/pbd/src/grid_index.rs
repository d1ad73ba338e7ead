/// Maps the flat vertex buffer of a `(cols + 1) x (rows + 1)` plane mesh
/// onto particle grid coordinates.
///
/// The mesh lists its top row first while the grid counts rows up from the
/// bottom, so the source row is `rows - j`. Dropping the inversion mirrors
/// the cloth vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexMap {
	cols: usize,
	rows: usize,
}

impl VertexMap {
	pub fn new(cols: usize, rows: usize) -> Self {
		Self { cols, rows }
	}

	pub fn len(&self) -> usize {
		(self.cols + 1) * (self.rows + 1)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Vertex coordinate `(i, j)` of linear index `idx`.
	pub fn to_grid(&self, idx: usize) -> (usize, usize) {
		debug_assert!(idx < self.len());
		(idx % (self.cols + 1), idx / (self.cols + 1))
	}

	pub fn to_index(&self, i: usize, j: usize) -> usize {
		debug_assert!(i <= self.cols && j <= self.rows);
		j * (self.cols + 1) + i
	}

	/// Particle coordinate whose position goes into vertex `idx`.
	pub fn source(&self, idx: usize) -> (usize, usize) {
		let (i, j) = self.to_grid(idx);
		(i, self.invert_row(j))
	}

	pub fn invert_row(&self, j: usize) -> usize {
		debug_assert!(j <= self.rows);
		self.rows - j
	}

	pub fn iter(&self) -> impl Iterator<Item = (usize, (usize, usize))> + '_ {
		(0..self.len()).map(move |idx| (idx, self.source(idx)))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_corners() {
		let (cols, rows) = (5, 10);
		let map = VertexMap::new(cols, rows);
		assert_eq!(map.len(), 66);
		assert_eq!(map.to_grid(0), (0, 0));
		assert_eq!(map.to_grid((cols + 1) * rows + cols), (cols, rows));
		assert_eq!(map.source(0), (0, rows));
		assert_eq!(map.source(map.len() - 1), (cols, 0));
	}

	#[test]
	fn test_row_inversion_round_trip() {
		let map = VertexMap::new(5, 10);
		for idx in 0..map.len() {
			let (i, j) = map.to_grid(idx);
			let (si, sj) = map.source(idx);
			assert_eq!(si, i);
			assert_eq!(sj, 10 - j);
			assert_eq!(map.invert_row(sj), j);
			assert_eq!(map.to_index(i, j), idx);
		}
	}

	#[test]
	fn test_not_empty() {
		let map = VertexMap::new(1, 1);
		assert_eq!(map.len(), 4);
		assert!(!map.is_empty());
	}

	#[test]
	#[cfg(debug_assertions)]
	#[should_panic]
	fn test_row_out_of_range() {
		VertexMap::new(5, 10).invert_row(11);
	}

	#[test]
	#[cfg(debug_assertions)]
	#[should_panic]
	fn test_index_out_of_range() {
		let map = VertexMap::new(5, 10);
		map.source(map.len());
	}

	#[test]
	fn test_every_particle_written_once() {
		let map = VertexMap::new(3, 4);
		let mut seen = vec![false; map.len()];
		for (_, (i, j)) in map.iter() {
			let k = i * 5 + j;
			assert!(!seen[k]);
			seen[k] = true;
		}
		assert!(seen.into_iter().all(|x| x));
	}
}
