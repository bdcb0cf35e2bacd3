use serde::{Deserialize, Serialize};

/// Money amount in whole rupiah.
///
/// The backend prices everything in IDR, which has no fractional unit
/// in practice, so a single integer field is exact. Serialized as the
/// bare number the wire format uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    rupiah: i64,
}

impl Money {
    /// Creates a new Money amount from whole rupiah.
    pub fn from_rupiah(rupiah: i64) -> Self {
        Self { rupiah }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { rupiah: 0 }
    }

    /// Returns the amount in whole rupiah.
    pub fn rupiah(&self) -> i64 {
        self.rupiah
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.rupiah > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.rupiah == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.rupiah < 0
    }

    /// Adds another money amount.
    pub fn add(&self, other: Money) -> Money {
        Money {
            rupiah: self.rupiah + other.rupiah,
        }
    }

    /// Subtracts another money amount.
    pub fn subtract(&self, other: Money) -> Money {
        Money {
            rupiah: self.rupiah - other.rupiah,
        }
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            rupiah: self.rupiah * quantity as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    /// Formats as the storefront shows prices: `Rp` with dot
    /// thousands separators, e.g. `Rp1.250.000`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.rupiah < 0 { "-" } else { "" };
        write!(f, "{sign}Rp{}", group_thousands(self.rupiah.unsigned_abs()))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            rupiah: self.rupiah + rhs.rupiah,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            rupiah: self.rupiah - rhs.rupiah,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.rupiah += rhs.rupiah;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.rupiah -= rhs.rupiah;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
