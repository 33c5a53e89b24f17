//! CommandRouter: maps command names onto handle operations.

use crate::engine::AudioEngineHandle;
use crate::telemetry::EngineEventKind;

use super::command::{Command, CommandKind, CommandResult};
use super::policy;

/// Single writer for an [`AudioEngineHandle`] for as long as it is borrowed.
pub struct CommandRouter<'a> {
    handle: &'a mut AudioEngineHandle,
    log_commands: bool,
}

impl<'a> CommandRouter<'a> {
    pub fn new(handle: &'a mut AudioEngineHandle) -> Self {
        Self {
            handle,
            log_commands: false,
        }
    }

    /// Log every dispatched command at debug level.
    pub fn with_command_logging(mut self, enabled: bool) -> Self {
        self.log_commands = enabled;
        self
    }

    /// Run one command against the handle.
    ///
    /// Unknown names yield [`CommandResult::NotImplemented`]; every known
    /// command succeeds.
    pub fn dispatch(&mut self, command: &Command) -> CommandResult {
        let Some(kind) = CommandKind::from_method(&command.name) else {
            log::warn!("[CommandRouter] Unknown command: {}", command.name);
            self.handle
                .telemetry()
                .record(EngineEventKind::UnknownCommand {
                    method: command.name.clone(),
                });
            return CommandResult::not_implemented(command.name.clone());
        };

        let result = self.execute(kind, command);
        if self.log_commands {
            tracing::debug!(
                "[CommandRouter] {} -> {:?} (state {})",
                kind.method_name(),
                result,
                self.handle.state()
            );
        }
        result
    }

    fn execute(&mut self, kind: CommandKind, command: &Command) -> CommandResult {
        match kind {
            CommandKind::InitializeAudio => CommandResult::boolean(self.handle.initialize()),
            CommandKind::StartAudio => {
                self.handle.start();
                CommandResult::empty()
            }
            CommandKind::StopAudio => {
                self.handle.stop();
                CommandResult::empty()
            }
            CommandKind::ReleaseAudio => {
                self.handle.release();
                CommandResult::empty()
            }
            CommandKind::SetVolume => {
                let volume = policy::coerce_volume(command.argument("volume"));
                self.handle.set_volume(volume);
                CommandResult::empty()
            }
            CommandKind::SetFrequency => {
                let frequency = policy::coerce_frequency(command.argument("frequency"));
                self.handle.set_frequency(frequency);
                CommandResult::empty()
            }
            CommandKind::IsAudioPlaying => CommandResult::boolean(self.handle.is_playing()),
            CommandKind::GetCurrentVolume => CommandResult::number(self.handle.volume()),
            CommandKind::GetCurrentFrequency => CommandResult::number(self.handle.frequency()),
        }
    }
}
