use crate::lines::Lines;
use crate::*;
use std::io::{BufRead, Write};

/// An ordered, read-only list of ballot options.
///
/// Options are addressed by their 1-based position. Labels are kept exactly as
/// read: blank lines are valid options and nothing is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    options: Vec<String>,
}

impl Catalog {
    /// Build a catalog from a sequence of labels, one option per label.
    pub fn load<I, S>(lines: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = lines.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(Error::MalformedCatalog);
        }

        Ok(Catalog { options })
    }

    /// Read a catalog line by line until end-of-stream.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`, so no label carries a terminator.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let lines = Lines::new(reader).collect::<Result<Vec<String>, _>>()?;
        Self::load(lines)
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always false for a loaded catalog
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Get the label of the option at a 1-based position
    pub fn label_at(&self, position: usize) -> Result<&str, Error> {
        if position == 0 || position > self.options.len() {
            return Err(Error::OutOfRange {
                position,
                max: self.options.len(),
            });
        }

        Ok(&self.options[position - 1])
    }

    /// Iterate over `(position, label)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, label)| (i + 1, label.as_str()))
    }

    /// Write the option listing shown to the voter: `<position>\t<label>` per line.
    ///
    /// Purely informational, the listing is never signed.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (position, label) in self.iter() {
            writeln!(out, "{}\t{}", position, label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_keeps_order_and_blank_lines() {
        let catalog = Catalog::from_reader("Option1\n\n  Option3 \n".as_bytes()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.label_at(1).unwrap(), "Option1");
        assert_eq!(catalog.label_at(2).unwrap(), "");
        assert_eq!(catalog.label_at(3).unwrap(), "  Option3 ");
    }

    #[test]
    fn test_crlf_terminators_are_stripped() {
        let catalog = Catalog::from_reader("Yes\r\nNo\r\n".as_bytes()).unwrap();
        assert_eq!(catalog.label_at(1).unwrap(), "Yes");
        assert_eq!(catalog.label_at(2).unwrap(), "No");
    }

    #[test]
    fn test_lone_cr_ends_a_label() {
        let catalog = Catalog::from_reader("A\nB\r".as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.label_at(2).unwrap(), "B");

        let catalog = Catalog::from_reader("Old\rMac\rStyle\r".as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.label_at(3).unwrap(), "Style");
    }

    #[test]
    fn test_empty_catalog_is_malformed() {
        assert!(matches!(
            Catalog::from_reader("".as_bytes()),
            Err(Error::MalformedCatalog)
        ));
        assert!(matches!(
            Catalog::load(Vec::<String>::new()),
            Err(Error::MalformedCatalog)
        ));
    }

    #[test]
    fn test_label_at_out_of_range() {
        let catalog = Catalog::load(vec!["A", "B"]).unwrap();

        assert!(matches!(
            catalog.label_at(0),
            Err(Error::OutOfRange { position: 0, max: 2 })
        ));
        assert!(matches!(
            catalog.label_at(3),
            Err(Error::OutOfRange { position: 3, max: 2 })
        ));
    }

    #[test]
    fn test_write_listing() {
        let catalog = Catalog::load(vec!["Option1", "Option2", "Option3"]).unwrap();
        let mut out = Vec::new();
        catalog.write_listing(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\tOption1\n2\tOption2\n3\tOption3\n"
        );
    }
}
