use std::collections::BTreeMap;
use std::fmt;

/// A scalar field value that can be fed into a [`FieldStats`].
///
/// The running mean is accumulated in a signed 32-bit integer and cast back to the field type,
/// so `to_acc`/`from_acc` are plain `as` casts (wrapping for `u32`).
pub trait Sample: Copy + Ord + Default + fmt::Display {
    fn to_acc(self) -> i32;
    fn from_acc(acc: i32) -> Self;
}

macro_rules! impl_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_acc(self) -> i32 {
                    self as i32
                }

                #[inline]
                fn from_acc(acc: i32) -> Self {
                    acc as $t
                }
            }
        )*
    };
}

impl_sample!(u8, i8, u16, i16, u32, i32);

/// Running statistics over one field of a table.
///
/// The mean is recomputed after every sample as `acc / count` with truncating integer division,
/// so its value depends on the order the samples were fed in.
#[derive(Debug, Clone, Default)]
pub struct FieldStats<T: Sample> {
    min: T,
    max: T,
    avg: T,
    count: i32,
    acc: i32,
    distribution: BTreeMap<T, usize>,
}

impl<T: Sample> FieldStats<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, value: T) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else if value < self.min {
            self.min = value;
        } else if value > self.max {
            self.max = value;
        }

        self.count = self.count.saturating_add(1);
        self.acc = self.acc.wrapping_add(value.to_acc());
        self.avg = T::from_acc(self.acc / self.count);

        *self.distribution.entry(value).or_insert(0) += 1;
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn mean(&self) -> T {
        self.avg
    }

    pub fn samples(&self) -> usize {
        self.count as usize
    }

    pub fn distribution(&self) -> &BTreeMap<T, usize> {
        &self.distribution
    }

    /// Values seen more than once, in ascending order.
    pub fn repeated(&self) -> impl Iterator<Item = (T, usize)> + '_ {
        self.distribution
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(value, count)| (*value, *count))
    }

    pub fn report(&self) -> String {
        self.to_string()
    }
}

/// Min and max are printed as signed 32-bit values, so a `u32` field at or above `2^31` shows up
/// negative there while the average and histogram keep the field's own type.
impl<T: Sample> fmt::Display for FieldStats<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "({} to {} ) Avg : {}",
            self.min.to_acc(),
            self.max.to_acc(),
            self.avg
        )?;
        writeln!(f, "\tDistribution with more than one match:")?;
        for (value, count) in self.repeated() {
            writeln!(f, "\t\tVal: {:>8} : {:>8} times", value, count)?;
        }
        Ok(())
    }
}
