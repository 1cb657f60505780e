pub mod obj;
pub mod rle;
pub mod tga;

pub use obj::{load_obj, load_obj_str, ObjError};
pub use rle::{Packet, Packets};
pub use tga::{encode_tga, write_tga, TgaError, TgaHeader};
