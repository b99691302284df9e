//! Example module: per-address counters, governance params and tweets.
//!
//! Collections and their prefixes inside the `example` store:
//!
//! | prefix | collection  | layout                          |
//! |--------|-------------|---------------------------------|
//! | 0      | `params`    | item, bincode [`Params`]        |
//! | 1      | `counter`   | address -> u64                  |
//! | 2      | `tweets_id` | sequence                        |
//! | 3      | `tweets`    | id -> bincode [`Tweet`]         |
//! | 4      | `liked_by`  | set of `(id, voter)`            |

pub mod error;
pub mod genesis;
pub mod keeper;
pub mod msg_server;
pub mod types;

pub use error::{ExampleError, Result};
pub use keeper::{Keeper, MODULE_NAME};
pub use msg_server::MsgServer;
pub use types::*;
