//! Match-summary row validation.

use serde_json::Value;
use tracing::debug;

use super::{
    coerce_count, coerce_string, coerce_yes_flag, normalize_key, Ingested, RowError, RowRejection,
};
use crate::models::{CallOutcome, MatchRow};

/// Validate a batch of raw match-summary rows.
///
/// Each row is re-keyed by canonical header, coerced field by field, and
/// either collected or dropped with its error. A bad cell never aborts
/// the batch.
pub fn parse_match_rows(raw: &[Value]) -> Ingested<MatchRow> {
    let mut out = Ingested::with_capacity(raw.len());

    for (index, value) in raw.iter().enumerate() {
        match parse_row(value) {
            Ok(row) => out.rows.push(row),
            Err(error) => {
                debug!(index, %error, "dropping match row");
                out.rejected.push(RowRejection { index, error });
            }
        }
    }

    out
}

fn parse_row(value: &Value) -> Result<MatchRow, RowError> {
    let object = value.as_object().ok_or(RowError::NotAnObject)?;

    let mut date = None;
    let mut championship = None;
    let mut round = None;
    let mut map = None;
    let mut team = None;
    let mut placement = None;
    let mut kills = None;
    let mut placement_points = None;
    let mut total_points = None;
    let mut booyah = None;
    let mut call_break = None;
    let mut call_outcome = None;

    for (key, cell) in object {
        match normalize_key(key).as_str() {
            "data" => date = Some(cell),
            "campeonato" => championship = Some(cell),
            "rodada" => round = Some(cell),
            "mapa" => map = Some(cell),
            "equipe" => team = Some(cell),
            "colocacao" => placement = Some(cell),
            "kill" | "kills" => kills = Some(cell),
            key if key.contains("pontosposicao") => placement_points = Some(cell),
            key if key.contains("pontostotal") => total_points = Some(cell),
            "booyah" => booyah = Some(cell),
            key if key.contains("quebradecall") => call_break = Some(cell),
            key if key.contains("resultadoquebra") => call_outcome = Some(cell),
            _ => {}
        }
    }

    Ok(MatchRow {
        date: coerce_string(date),
        championship: coerce_string(championship),
        round: coerce_count("rodada", round)?,
        map: coerce_string(map).unwrap_or_default(),
        team: coerce_string(team),
        placement: coerce_count("colocacao", placement)?,
        kills: coerce_count("kill", kills)?.unwrap_or(0),
        placement_points: coerce_count("pontos/posicao", placement_points)?.unwrap_or(0),
        total_points: coerce_count("pontos_total", total_points)?.unwrap_or(0),
        booyah: coerce_yes_flag(booyah),
        call_break: coerce_yes_flag(call_break),
        call_outcome: coerce_string(call_outcome)
            .map(|s| CallOutcome::parse(&s))
            .unwrap_or_default(),
    })
}
