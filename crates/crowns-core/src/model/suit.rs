use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Blue = 0,
    Green = 1,
    Red = 2,
    Black = 3,
    Yellow = 4,
}

impl Suit {
    /// Every suit in sort order, which follows the symbol letters.
    pub const ALL: [Suit; 5] = [
        Suit::Blue,
        Suit::Green,
        Suit::Red,
        Suit::Black,
        Suit::Yellow,
    ];

    /// Order used when gathering a set across suits and when drawing
    /// round-rank wildcards. Black comes before red here, unlike in `ALL`.
    pub const MELD_ORDER: [Suit; 5] = [
        Suit::Blue,
        Suit::Green,
        Suit::Black,
        Suit::Red,
        Suit::Yellow,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Blue),
            1 => Some(Suit::Green),
            2 => Some(Suit::Red),
            3 => Some(Suit::Black),
            4 => Some(Suit::Yellow),
            _ => None,
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'B' => Some(Suit::Blue),
            'G' => Some(Suit::Green),
            'R' => Some(Suit::Red),
            'X' => Some(Suit::Black),
            'Y' => Some(Suit::Yellow),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Blue => 'B',
            Suit::Green => 'G',
            Suit::Red => 'R',
            Suit::Black => 'X',
            Suit::Yellow => 'Y',
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
