use anyhow::Result;

use crate::archive::{ArchiveSet, open_archives};
use crate::config::Config;
use crate::dump::read_dump_file;
use crate::link::{LinkRecord, decompose};
use crate::matcher::{MemberMatcher, decode_source};
use crate::report::{Diagnostic, MissKind, Reporter, Summary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    Missing(Diagnostic),
}

/// Resolves one dump record: either the package directory, or the class file
/// and then (for `#member` links) a matching declaration line.
pub fn resolve_record(
    archives: &mut ArchiveSet,
    matcher: &dyn MemberMatcher,
    record: &LinkRecord,
) -> Outcome {
    let decoded = decompose(&record.link);
    let missing = |kind, target| {
        Outcome::Missing(Diagnostic {
            kind,
            target,
            page: record.page.clone(),
            line: record.source_line.clone(),
        })
    };

    if decoded.is_package() {
        if archives.find_package(&decoded.package_path) {
            return Outcome::Resolved;
        }
        return missing(MissKind::Package, decoded.qualified_name.clone());
    }

    let entry_path = decoded.class_entry_path();
    let Some(content) = archives.find_class_file(&entry_path) else {
        return missing(MissKind::ClassFile, entry_path);
    };

    let Some(member) = decoded.member.as_ref() else {
        return Outcome::Resolved;
    };

    let source = decode_source(&content);
    if matcher.matches(&source, member) {
        Outcome::Resolved
    } else {
        missing(MissKind::Member, decoded.display_member())
    }
}

/// Resolves every record in order, reporting each miss.
pub fn check_records(
    archives: &mut ArchiveSet,
    matcher: &dyn MemberMatcher,
    records: &[LinkRecord],
    reporter: &mut dyn Reporter,
    summary: &mut Summary,
) -> Result<()> {
    for record in records {
        summary.records += 1;
        match resolve_record(archives, matcher, record) {
            Outcome::Resolved => summary.resolved += 1,
            Outcome::Missing(diagnostic) => {
                summary.missing += 1;
                reporter.report(&diagnostic)?;
            }
        }
    }
    Ok(())
}

/// Full run: read the dump, open the archives, check every record.
/// The archives are closed when this returns, on success or error.
pub fn run(
    config: &Config,
    matcher: &dyn MemberMatcher,
    reporter: &mut dyn Reporter,
) -> Result<Summary> {
    eprintln!("[jdlink-check] reading dump {}", config.dump.display());
    let dump = read_dump_file(&config.dump)?;
    for malformed in &dump.malformed {
        eprintln!("[jdlink-check] skipping {malformed}");
    }

    let (mut archives, open_errors) = open_archives(&config.archives);
    for err in &open_errors {
        eprintln!("[jdlink-check] skipping archive: {err}");
    }
    for label in archives.labels() {
        eprintln!("[jdlink-check] opened {label}");
    }
    if archives.is_empty() {
        eprintln!(
            "[jdlink-check] no archive could be opened; every link will be reported missing"
        );
    }

    let mut summary = Summary {
        malformed: dump.malformed.len(),
        archives_opened: archives.len(),
        archives_skipped: open_errors.len(),
        ..Summary::default()
    };

    check_records(&mut archives, matcher, &dump.records, reporter, &mut summary)?;
    reporter.finish(&summary)?;

    eprintln!(
        "[jdlink-check] checked {} links: {} resolved, {} missing",
        summary.records, summary.resolved, summary.missing
    );
    Ok(summary)
}
