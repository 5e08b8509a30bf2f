#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskDescriptionRequired,
    TaskAdded(u64, String), // id, text
    TaskToggled(u64, bool), // id, completed
    TaskDeleted(u64),
    TaskNotFoundWithId(u64),
    TaskIdsExhausted,
    TasksEmptyState,
    TasksHeader,

    // === STORAGE MESSAGES ===
    DurableStorageUnavailable,
    TemporaryStorageInUse,
    TasksSaveFailed,
    TasksLoadFailed,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigLoadFailed(String), // error
    ConfigDataDirectory(String),

    // === SHELL MESSAGES ===
    ShellWelcome,
    ShellHelp,
    ShellUnknownCommand(String),
    ShellInvalidId(String),
    ShellGoodbye,

    // === PROMPTS ===
    PromptShellCommand,
    PromptDataDirectory,
    PromptStorageKey,
}
