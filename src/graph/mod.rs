mod atom;
mod bond;

pub use atom::Atom;
pub use bond::Bond;
