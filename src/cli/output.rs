//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use pickgit::{PickGitError, RepositoryMetadata};
use serde::Serialize;

const USAGE: &str = "\
Nothing to do. Choose an operation:
  --migrate-db                          apply database migrations
  --register                            register the owner of --token
  --username <NAME>                     list repositories of NAME
  --keyword <WORD> [--page N --limit N] search repositories by name
  --content <TEXT> [--images a.png,b.png --tags a,b --repo-url URL]
                                        write a post as --username
  --post-id <ID>                        show a post
  --post-id <ID> --comment <TEXT>       comment on a post as --username";

/// Writes a listing of repositories to the given writer.
pub fn write_repositories<W: Write>(
    writer: &mut W,
    heading: &str,
    repositories: &[RepositoryMetadata],
) -> Result<(), PickGitError> {
    writeln!(writer, "{heading}").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    for repository in repositories {
        let language = repository.language.as_deref().unwrap_or("unknown");
        let url = repository.url.as_deref().unwrap_or("no URL provided");
        writeln!(
            writer,
            "  {} [{language}] stars: {} forks: {} {url}",
            repository.name, repository.stars, repository.forks
        )
        .map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "{} repositories shown", repositories.len()).map_err(|e| io_error(&e))
}

/// Writes a value as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), PickGitError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|error| PickGitError::Io {
        message: format!("failed to serialise output: {error}"),
    })?;
    writeln!(writer, "{rendered}").map_err(|e| io_error(&e))
}

/// Writes the usage hint shown when no operation was requested.
pub fn write_usage<W: Write>(writer: &mut W) -> Result<(), PickGitError> {
    writeln!(writer, "{USAGE}").map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`PickGitError::Io`].
pub(crate) fn io_error(error: &io::Error) -> PickGitError {
    PickGitError::Io {
        message: error.to_string(),
    }
}
