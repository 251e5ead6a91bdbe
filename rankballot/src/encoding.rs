use crate::*;
use std::io::Write;

/// Write the chosen labels in rank order, with no separators and no terminator.
///
/// This is the text the voter is shown as their final ranking and, byte for byte,
/// the payload that gets signed.
pub fn write_selection_order<W: Write>(
    selection: &Selection,
    catalog: &Catalog,
    out: &mut W,
) -> Result<(), Error> {
    if selection.num_options() != catalog.len() {
        return Err(Error::CatalogMismatch {
            selection: selection.num_options(),
            catalog: catalog.len(),
        });
    }

    for &position in selection.positions() {
        out.write_all(catalog.label_at(position)?.as_bytes())?;
    }
    Ok(())
}

/// Encode a completed selection into its canonical payload bytes.
pub fn encode(selection: &Selection, catalog: &Catalog) -> Result<Vec<u8>, Error> {
    if !selection.is_complete() {
        return Err(Error::IncompleteSelection {
            collected: selection.len(),
            expected: selection.num_options(),
        });
    }

    let mut payload = Vec::new();
    write_selection_order(selection, catalog, &mut payload)?;
    Ok(payload)
}
