use std::ops;

use crate::dims::Dims;

/// Row-major 2D store, the backing container of every grid in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Dims {
        Dims(self.rows as i32, self.columns as i32)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        if !pos.all_non_negative() {
            return None;
        }

        let Dims(row, column) = pos;
        let (row, column) = (row as usize, column as usize);

        if row >= self.rows || column >= self.columns {
            return None;
        }

        Some(row * self.columns + column)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        let row = idx / self.columns;
        let column = idx % self.columns;

        Some(Dims(row as i32, column as i32))
    }

    pub fn contains(&self, pos: Dims) -> bool {
        self.dim_to_idx(pos).is_some()
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buf.iter_mut()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    /// Position of the first item (row-major) matching the predicate.
    pub fn find_by(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Dims> {
        self.buf
            .iter()
            .position(|item| pred(item))
            .and_then(|i| self.idx_to_dim(i))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Array2D<U> {
        Array2D {
            buf: self.buf.into_iter().map(f).collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Builds the array by calling `f` for every position, in row-major order.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(Dims) -> T) -> Self {
        let buf = Dims::iter_fill(Dims(rows as i32, columns as i32))
            .map(&mut f)
            .collect();

        Self { buf, rows, columns }
    }
}

impl<T: PartialEq> Array2D<T> {
    /// Position of the first item (row-major) equal to `value`.
    pub fn find(&self, value: &T) -> Option<Dims> {
        self.find_by(|item| item == value)
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, columns: usize) -> Self {
        Self {
            buf: vec![item; rows * columns],
            rows,
            columns,
        }
    }

    pub fn new_dims(item: T, size: Dims) -> Option<Self> {
        if !size.all_non_negative() {
            return None;
        }

        Some(Self::new(item, size.0 as usize, size.1 as usize))
    }

    pub fn fill(&mut self, item: T) {
        self.buf.fill(item);
    }

    /// Resets every slot, keeping the dimensions.
    pub fn clear(&mut self, item: T) {
        self.fill(item);
    }

    /// Replaces the backing store. The overlapping top-left block is kept, new slots get `item`.
    pub fn resize(&mut self, rows: usize, columns: usize, item: T) {
        let old = std::mem::replace(self, Self::new(item, rows, columns));

        for pos in old.iter_pos() {
            if let Some(slot) = self.get_mut(pos) {
                *slot = old[pos].clone();
            }
        }
    }

    /// Inserts a row before `at`, shifting the following rows down.
    pub fn insert_row(&mut self, at: usize, item: T) {
        assert!(at <= self.rows, "row {at} out of bounds");

        let start = at * self.columns;
        self.buf
            .splice(start..start, std::iter::repeat(item).take(self.columns));
        self.rows += 1;
    }

    /// Inserts a column before `at`, shifting the following columns right.
    pub fn insert_column(&mut self, at: usize, item: T) {
        assert!(at <= self.columns, "column {at} out of bounds");

        let columns = self.columns + 1;
        let mut old = std::mem::take(&mut self.buf).into_iter();
        self.buf = Vec::with_capacity(self.rows * columns);
        for _ in 0..self.rows {
            for column in 0..columns {
                if column == at {
                    self.buf.push(item.clone());
                } else if let Some(value) = old.next() {
                    self.buf.push(value);
                }
            }
        }
        self.columns = columns;
    }
}

impl<T> Array2D<T> {
    pub fn remove_row(&mut self, at: usize) {
        assert!(at < self.rows, "row {at} out of bounds");

        let start = at * self.columns;
        self.buf.drain(start..start + self.columns);
        self.rows -= 1;
    }

    pub fn remove_column(&mut self, at: usize) {
        assert!(at < self.columns, "column {at} out of bounds");

        let columns = self.columns;
        let mut idx = 0;
        self.buf.retain(|_| {
            let keep = idx % columns != at;
            idx += 1;
            keep
        });
        self.columns -= 1;
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.dim_to_idx(index)
            .and_then(|i| self.buf.get(i))
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.dim_to_idx(index)
            .and_then(|i| self.buf.get_mut(i))
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: usize, columns: usize) -> Array2D<i32> {
        Array2D::from_fn(rows, columns, |pos| pos.0 * 10 + pos.1)
    }

    #[test]
    fn index_round_trip() {
        let arr = numbered(3, 4);
        assert_eq!(arr.size(), Dims(3, 4));
        assert_eq!(arr[Dims(2, 3)], 23);
        assert_eq!(arr.dim_to_idx(Dims(1, 2)), Some(6));
        assert_eq!(arr.idx_to_dim(6), Some(Dims(1, 2)));
        assert_eq!(arr.get(Dims(3, 0)), None);
        assert_eq!(arr.get(Dims(0, -1)), None);
    }

    #[test]
    #[should_panic(expected = "Index out of bounds")]
    fn out_of_range_index_panics() {
        let arr = numbered(2, 2);
        let _ = arr[Dims(2, 0)];
    }

    #[test]
    fn find_by_value_and_predicate() {
        let arr = numbered(3, 3);
        assert_eq!(arr.find(&21), Some(Dims(2, 1)));
        assert_eq!(arr.find(&99), None);
        assert_eq!(arr.find_by(|v| v % 10 == 2), Some(Dims(0, 2)));
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut arr = numbered(2, 3);
        arr.resize(3, 2, -1);

        assert_eq!(arr.size(), Dims(3, 2));
        assert_eq!(arr[Dims(0, 0)], 0);
        assert_eq!(arr[Dims(1, 1)], 11);
        assert_eq!(arr[Dims(2, 0)], -1);
        assert_eq!(arr[Dims(2, 1)], -1);
    }

    #[test]
    fn insert_and_remove_rows() {
        let mut arr = numbered(2, 2);
        arr.insert_row(1, 7);
        assert_eq!(arr.iter().copied().collect::<Vec<_>>(), [0, 1, 7, 7, 10, 11]);

        arr.remove_row(0);
        assert_eq!(arr.size(), Dims(2, 2));
        assert_eq!(arr.iter().copied().collect::<Vec<_>>(), [7, 7, 10, 11]);
    }

    #[test]
    fn insert_and_remove_columns() {
        let mut arr = numbered(2, 2);
        arr.insert_column(0, 5);
        assert_eq!(arr.iter().copied().collect::<Vec<_>>(), [5, 0, 1, 5, 10, 11]);

        arr.remove_column(2);
        assert_eq!(arr.size(), Dims(2, 2));
        assert_eq!(arr.iter().copied().collect::<Vec<_>>(), [5, 0, 5, 10]);
    }
}
