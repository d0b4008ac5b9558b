use std::ops;

use crate::core::{Pos, Size};

/// Row-major 2D storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn pos_to_idx(&self, pos: Pos) -> Option<usize> {
        if !self.size().contains(pos) {
            return None;
        }

        Some(pos.row as usize * self.width + pos.column as usize)
    }

    pub fn idx_to_pos(&self, idx: usize) -> Option<Pos> {
        if idx >= self.buf.len() {
            return None;
        }

        let column = idx % self.width;
        let row = idx / self.width;

        Some(Pos::new(row as i32, column as i32))
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.pos_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.pos_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_pos(i))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // `chunks` rejects a zero chunk size, an empty buffer yields no rows anyway
        self.buf.chunks(self.width.max(1))
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.height {
            return None;
        }

        let start = row * self.width;
        Some(&self.buf[start..start + self.width])
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, width: usize, height: usize) -> Self {
        Self {
            buf: vec![item; width * height],
            width,
            height,
        }
    }

    pub fn new_size(item: T, size: Size) -> Self {
        Self::new(item, size.width, size.height)
    }
}

impl<T> ops::Index<Pos> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        self.get(index).expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Pos> for Array2D<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        self.get_mut(index).expect("Index out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip_is_row_major() {
        let arr = Array2D::new(0u8, 3, 2);
        assert_eq!(arr.pos_to_idx(Pos::new(1, 2)), Some(5));
        assert_eq!(arr.idx_to_pos(4), Some(Pos::new(1, 1)));
        assert_eq!(arr.pos_to_idx(Pos::new(2, 0)), None);
        assert_eq!(arr.pos_to_idx(Pos::new(0, -1)), None);
        assert_eq!(arr.idx_to_pos(6), None);
    }

    #[test]
    fn rows_split_by_width() {
        let mut arr = Array2D::new(0, 2, 3);
        arr[Pos::new(2, 1)] = 7;
        let rows: Vec<_> = arr.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[0, 7]);
        assert_eq!(arr.row(2), Some(&[0, 7][..]));
        assert_eq!(arr.row(3), None);
    }

    #[test]
    #[should_panic(expected = "Index out of bounds")]
    fn index_out_of_bounds_panics() {
        let arr = Array2D::new(false, 2, 2);
        let _ = arr[Pos::new(2, 2)];
    }
}
