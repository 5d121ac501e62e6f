//! Command-line argument resolution.
//!
//! A [Tokenizer] groups the raw arguments by switch. Each typed argument is
//! then declared against the resulting [Args], which is moved into its
//! retrieval phase to read values. Finishing the [Args] rejects every switch
//! that no declared argument answers to.
//!
//! ```
//! use switchyard::{Flag, Single, Tokenizer};
//!
//! let argv = ["greet", "--name", "alice", "-v"].iter().map(|s| s.to_string());
//! let name = Single::<String>::new("name").required();
//! let verbose = Flag::new("verbose").alias("v");
//!
//! let mut args = Tokenizer::new().tokenize(argv);
//! args.declare(&name).declare(&verbose);
//! let (name, verbose) = args
//!     .ready()
//!     .scope(|a| Ok((a.get(&name)?, a.get(&verbose)?)))
//!     .unwrap();
//! assert_eq!(name, "alice");
//! assert_eq!(verbose, true);
//! ```

mod arg;
mod error;
mod key;
mod lexer;
mod store;

pub mod args;

pub use arg::{Descriptor, Flag, Multiple, Required, Single};
pub use args::states::{Declare, Retrieve};
pub use args::Args;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use key::Key;
pub use lexer::Tokenizer;
pub use store::Store;
