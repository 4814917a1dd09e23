pub mod title;

pub use title::{TitleForm, TitleMatch, TitleParser};
