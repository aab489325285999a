//! Org-mode outline writer: one table section per group, then one per
//! ungrouped histogram.

use std::{borrow::Cow, collections::HashSet, io::Write};

use tracing::{debug, warn};

use crate::{
    core::{
        constants::{ORG_SEPARATOR, ORG_TBLNAME, XMAX_LABEL, XMIN_LABEL},
        error::RenderError,
        pool::PoolQuery,
    },
    render::{
        classifier::Classification,
        table::{BinTable, resolve_1d},
    },
};

/// Org table name for `s`: anything outside `[A-Za-z0-9_-]` becomes `_`.
#[must_use]
pub fn table_name(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Hands out `#+TBLNAME` values unique within one document.
///
/// A sanitised name already taken gets `_2`, `_3`, ... appended.
#[derive(Debug, Default)]
pub struct TableNames {
    taken: HashSet<String>,
}

impl TableNames {
    pub fn claim(&mut self, title: &str) -> String {
        let base = table_name(title);
        let mut candidate = base.clone();
        let mut n = 1;
        while !self.taken.insert(candidate.clone()) {
            n += 1;
            candidate = format!("{base}_{n}");
        }
        candidate
    }
}

/// Escape `|` so a cell never splits into two columns.
#[must_use]
pub fn cell(text: &str) -> Cow<'_, str> {
    if text.contains('|') {
        Cow::Owned(text.replace('|', "\\vert{}"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Column label of group member `name`.
///
/// The tag is looked up inside the name. When found after some prefix, the
/// prefix minus its trailing delimiter is the label (`energy_calo` in
/// `calo` gives `energy`); when the name starts with the tag, the remainder
/// minus its leading delimiter is used. Names that do not contain the tag,
/// or would trim to nothing, are used verbatim.
#[must_use]
pub fn column_label<'n>(name: &'n str, group: &str) -> &'n str {
    let trimmed = match name.find(group) {
        _ if group.is_empty() => None,
        Some(0) => {
            let rest = &name[group.len()..];
            let mut chars = rest.chars();
            chars.next();
            Some(chars.as_str())
        }
        Some(pos) => name[..pos]
            .char_indices()
            .next_back()
            .map(|(cut, _)| &name[..cut]),
        None => None,
    };
    match trimmed {
        Some(label) if !label.is_empty() => label,
        _ => {
            warn!(name, group, "group tag not found in member name, using full name as column label");
            name
        }
    }
}

fn write_section<W: Write + ?Sized>(
    out: &mut W,
    names: &mut TableNames,
    title: &str,
    labels: &[&str],
    table: &BinTable,
) -> Result<(), RenderError> {
    writeln!(out, "* {title}")?;
    writeln!(out, "{ORG_TBLNAME} {}", names.claim(title))?;
    write!(out, "|{XMIN_LABEL}|{XMAX_LABEL}|")?;
    for label in labels {
        write!(out, "{}|", cell(label))?;
    }
    writeln!(out)?;
    writeln!(out, "{ORG_SEPARATOR}")?;
    for row in table.rows() {
        writeln!(out, "{row}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// Emit the table for `group`, skipping 2D members.
fn write_group<P, W>(
    pool: &P,
    group: &str,
    members: &[&str],
    out: &mut W,
    names: &mut TableNames,
) -> Result<(), RenderError>
where
    P: PoolQuery + ?Sized,
    W: Write + ?Sized,
{
    let mut table: Option<BinTable> = None;
    let mut labels = Vec::with_capacity(members.len());

    for &name in members {
        let h = match resolve_1d(pool, name) {
            Ok(h) => h,
            Err(RenderError::Unsupported2D(_)) => {
                warn!(name, group, "skipping 2D histogram: not supported in org output");
                continue;
            }
            Err(e) => return Err(e),
        };
        match table.as_mut() {
            None => table = Some(BinTable::encode_first(h)),
            Some(t) => t.append_column(name, h)?,
        }
        labels.push(column_label(name, group));
    }

    match table {
        Some(t) => write_section(out, names, group, &labels, &t),
        None => {
            warn!(group, "group has no 1D histogram, no table emitted");
            Ok(())
        }
    }
}

/// Render every group and ungrouped histogram of `pool` as an org document.
pub fn write_org<P, W>(pool: &P, out: &mut W) -> Result<(), RenderError>
where
    P: PoolQuery + ?Sized,
    W: Write + ?Sized,
{
    let classes = Classification::of(pool);
    let mut names = TableNames::default();
    debug!(groups = classes.group_count(), "writing org document");

    for group in classes.groups() {
        let members = classes.filtered_names(group);
        write_group(pool, group, &members, out, &mut names)?;
    }

    for name in classes.ungrouped_names() {
        match resolve_1d(pool, name) {
            Ok(h) => {
                write_section(out, &mut names, name, &[name], &BinTable::encode_first(h))?;
            }
            Err(RenderError::Unsupported2D(_)) => {
                warn!(name, "skipping 2D histogram: not supported in org output");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
