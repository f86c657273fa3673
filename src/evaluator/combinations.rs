/// Iterator over every C(n,5) combination of five indices drawn from `0..n`,
/// in lexicographic order.
pub struct FiveCardCombinations {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveCardCombinations {
    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for FiveCardCombinations {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find rightmost index that can be incremented
        let mut i = 4;
        loop {
            if self.indices[i] < self.n - (5 - i) {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}
