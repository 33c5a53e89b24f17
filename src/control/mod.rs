// Control protocol: command table, argument coercion and dispatch
//
// - command: Command/ArgValue inputs and CommandResult replies
// - policy: volume and frequency coercion
// - router: CommandRouter mapping names onto AudioEngineHandle operations

pub mod command;
pub mod policy;
pub mod router;

pub use command::{ArgValue, Command, CommandKind, CommandResult, ReplyValue};
pub use router::CommandRouter;
