use serde::{Deserialize, Serialize};

/// A named biological sequence as read from a FASTA file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub data: Vec<u8>,
}

impl Sequence {
    pub fn new<S: Into<String>>(id: S, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            description: None,
            data,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy with all symbols converted to ASCII uppercase
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id.clone(),
            description: self.description.clone(),
            data: self.data.to_ascii_uppercase(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("chr1", b"acgtN".to_vec()).with_description("test".to_string());
        assert_eq!(seq.id, "chr1");
        assert_eq!(seq.len(), 5);
        assert!(!seq.is_empty());
        assert_eq!(seq.description.as_deref(), Some("test"));
        assert_eq!(seq.normalized().data, b"ACGTN");
    }
}
