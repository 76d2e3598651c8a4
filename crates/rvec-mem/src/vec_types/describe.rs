use core::{
    fmt::{self, Display, Formatter},
    ptr::NonNull,
};

/// Field dump of a vector, rendered one field per line.
#[derive(Clone, Copy, Debug)]
pub struct Describe {
    pub items: Option<NonNull<u8>>,
    pub item_size: usize,
    pub len: usize,
    pub capacity: usize,
}

impl Display for Describe {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vector {{")?;
        match self.items {
            Some(items) => writeln!(f, "\titems: {:p}", items)?,
            None => writeln!(f, "\titems: 0x0")?,
        }
        writeln!(f, "\titem_size: {}", self.item_size)?;
        writeln!(f, "\tlength: {}", self.len)?;
        writeln!(f, "\tcapacity: {}", self.capacity)?;
        write!(f, "}}")
    }
}
