// Mon Jan 19 2026 - Alex

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    value: usize,
}

impl Alignment {
    /// Zero is treated as byte alignment.
    pub fn new(value: usize) -> Self {
        Self { value: value.max(1) }
    }

    /// Natural alignment capped by a `#pragma pack` value.
    pub fn packed(natural: usize, pack: Option<usize>) -> Self {
        match pack {
            Some(pack) if pack > 0 => Self::new(natural.min(pack)),
            _ => Self::new(natural),
        }
    }

    pub fn as_usize(&self) -> usize {
        self.value
    }

    pub fn padding_for(&self, offset: usize) -> usize {
        (self.value - offset % self.value) % self.value
    }

    pub fn align(&self, offset: usize) -> usize {
        offset + self.padding_for(offset)
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        let align = Alignment::new(4);
        assert_eq!(align.padding_for(0), 0);
        assert_eq!(align.padding_for(1), 3);
        assert_eq!(align.padding_for(4), 0);
        assert_eq!(align.align(5), 8);
    }

    #[test]
    fn test_packed() {
        assert_eq!(Alignment::packed(8, Some(2)).as_usize(), 2);
        assert_eq!(Alignment::packed(1, Some(4)).as_usize(), 1);
        assert_eq!(Alignment::packed(8, None).as_usize(), 8);
        assert_eq!(Alignment::new(0).as_usize(), 1);
    }

    #[test]
    fn test_non_power_of_two() {
        assert_eq!(Alignment::new(3).align(4), 6);
    }
}
