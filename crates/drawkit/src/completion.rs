use clap::{CommandFactory, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::Powershell => Self::PowerShell,
        }
    }
}

/// Write a completion script for `C` to stdout.
pub fn print<C: CommandFactory>(shell: Shell, bin_name: &str) {
    let mut cmd = C::command();
    clap_complete::generate(
        clap_complete::Shell::from(shell),
        &mut cmd,
        bin_name,
        &mut std::io::stdout(),
    );
}
