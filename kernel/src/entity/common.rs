mod keyword;

pub use self::keyword::*;
