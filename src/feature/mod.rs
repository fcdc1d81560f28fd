mod bond_order;
mod chirality;
mod element_ext;
mod rnum;
mod stereo;

pub use bond_order::BondOrder;
pub use chirality::Chirality;
pub use element_ext::ElementExt;
pub use rnum::Rnum;
pub use stereo::Stereo;
