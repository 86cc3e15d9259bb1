use rand::RngCore;

/// A source of uniformly distributed bytes for `Cxnn`
pub trait Entropy {
    fn next_byte(&mut self) -> u8;
}

/// Any `rand` generator will do; seed a `StdRng` for reproducible runs
impl<R: RngCore> Entropy for R {
    fn next_byte(&mut self) -> u8 {
        (self.next_u32() & 0xFF) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = StdRng::seed_from_u64(8);
        let mut b = StdRng::seed_from_u64(8);
        let left: Vec<u8> = (0..32).map(|_| a.next_byte()).collect();
        let right: Vec<u8> = (0..32).map(|_| b.next_byte()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_bytes_vary() {
        let mut rng = StdRng::seed_from_u64(1);
        let bytes: Vec<u8> = (0..64).map(|_| rng.next_byte()).collect();
        assert!(bytes.iter().any(|&b| b != bytes[0]));
    }
}
