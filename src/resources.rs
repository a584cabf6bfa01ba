#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new(name: &str, data: &[u8]) -> Self {
        Rom {
            name: name.to_string(),
            data: data.into(),
        }
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

impl From<Vec<u8>> for Rom {
    fn from(data: Vec<u8>) -> Self {
        Rom {
            name: String::new(),
            data: data.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Rom;

    #[test]
    fn test_rom() {
        let rom = Rom::new("JUMP", &[0x12, 0x00]);
        assert_eq!("JUMP", rom.get_name());
        assert_eq!(&[0x12, 0x00], rom.get_data());

        let unnamed = Rom::from(vec![0x00, 0xE0]);
        assert_eq!("", unnamed.get_name());
        assert_eq!(2, unnamed.get_data().len());
    }
}
