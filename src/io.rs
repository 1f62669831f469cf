use crate::model::{Duty, DutyId};
use crate::notification::Notifier;
use crate::scheduler::DutyStore;
use anyhow::{bail, Context};
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const CSV_HEADER: [&str; 5] = ["id", "name", "depot", "start", "end"];

/// Charge l'univers depuis un tableau JSON `[{id, name, depot, start, end}]`.
pub fn load_duties_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Duty>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_duties_json(&data).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_duties_json(data: &[u8]) -> anyhow::Result<Vec<Duty>> {
    let duties: Vec<Duty> = serde_json::from_slice(data)?;
    Ok(duties)
}

/// Import CSV: header `id,name,depot,start,end` (ISO-8601, normalisé en UTC)
pub fn import_duties_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Duty>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let id: u32 = id
            .parse()
            .with_context(|| format!("invalid duty id: {id}"))?;
        let id = DutyId::new(id);
        let name = rec.get(1).context("missing name")?.trim();
        let depot = rec.get(2).context("missing depot")?.trim();
        let start = parse_instant(rec.get(3).context("missing start")?)
            .with_context(|| format!("start of duty {id}"))?;
        let end = parse_instant(rec.get(4).context("missing end")?)
            .with_context(|| format!("end of duty {id}"))?;
        out.push(Duty::new(id, name, depot, start, end)?);
    }
    Ok(out)
}

/// Choisit le format selon l'extension (`.csv`, sinon JSON).
pub fn load_duties<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Duty>> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => import_duties_csv(path),
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_duties_json(path),
        Some(ext) => bail!("unsupported duty file extension: {ext}"),
        None => load_duties_json(path),
    }
}

fn parse_instant(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    let dt = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid ISO-8601 timestamp: {raw}"))?;
    Ok(dt.with_timezone(&Utc))
}

#[derive(Serialize)]
struct SessionView<'a> {
    available: &'a [Duty],
    assigned: &'a [Duty],
}

/// Export JSON des deux pools, écrit de manière atomique.
pub fn export_session_json<P: AsRef<Path>, N: Notifier>(
    path: P,
    store: &DutyStore<N>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let view = SessionView {
        available: store.available(),
        assigned: store.assigned(),
    };
    let json = serde_json::to_vec_pretty(&view)?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export CSV des services: header `id,name,depot,start,end`
pub fn export_duties_csv<P: AsRef<Path>>(path: P, duties: &[Duty]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    write_duties_csv(&mut w, duties)?;
    w.flush()?;
    Ok(())
}

/// Rendu CSV en mémoire (même format que `export_duties_csv`).
pub fn duties_to_csv(duties: &[Duty]) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    {
        let mut w = WriterBuilder::new().has_headers(true).from_writer(&mut buf);
        write_duties_csv(&mut w, duties)?;
        w.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

fn write_duties_csv<W: std::io::Write>(
    w: &mut csv::Writer<W>,
    duties: &[Duty],
) -> anyhow::Result<()> {
    w.write_record(CSV_HEADER)?;
    let mut id_buf = itoa::Buffer::new();
    for d in duties {
        let start = d.start().to_rfc3339_opts(SecondsFormat::Secs, true);
        let end = d.end().to_rfc3339_opts(SecondsFormat::Secs, true);
        w.write_record([
            id_buf.format(d.id().get()),
            d.name(),
            d.depot(),
            start.as_str(),
            end.as_str(),
        ])?;
    }
    Ok(())
}
