//! Player-performance row validation.

use serde_json::Value;
use tracing::debug;

use super::{
    coerce_count, coerce_count_lenient, coerce_string, normalize_key, Ingested, RowError,
    RowRejection,
};
use crate::models::PlayerRow;

/// Validate a batch of raw player-performance rows.
///
/// The player name is the only required field. Counters are lenient:
/// absent or non-numeric cells default to 0 rather than dropping the
/// row, since per-player sheets are the most loosely authored.
pub fn parse_player_rows(raw: &[Value]) -> Ingested<PlayerRow> {
    let mut out = Ingested::with_capacity(raw.len());

    for (index, value) in raw.iter().enumerate() {
        match parse_row(value) {
            Ok(row) => out.rows.push(row),
            Err(error) => {
                debug!(index, %error, "dropping player row");
                out.rejected.push(RowRejection { index, error });
            }
        }
    }

    out
}

fn parse_row(value: &Value) -> Result<PlayerRow, RowError> {
    let object = value.as_object().ok_or(RowError::NotAnObject)?;

    let mut date = None;
    let mut team = None;
    let mut mode = None;
    let mut map = None;
    let mut placement = None;
    let mut player = None;
    let mut kills = None;
    let mut deaths = None;
    let mut assists = None;
    let mut falls = None;
    let mut damage = None;
    let mut knockdowns = None;
    let mut revives = None;

    for (key, cell) in object {
        match normalize_key(key).as_str() {
            "data" => date = Some(cell),
            "equipe" => team = Some(cell),
            "modo" => mode = Some(cell),
            "mapa" => map = Some(cell),
            "posicao" => placement = Some(cell),
            "player" => player = Some(cell),
            "kill" | "kills" => kills = Some(cell),
            "morte" | "mortes" => deaths = Some(cell),
            // Substring match absorbs singular/plural and the sheet's
            // historically mangled encodings of "Assistência".
            key if key.contains("assist") => assists = Some(cell),
            "queda" | "quedas" => falls = Some(cell),
            key if key.contains("danocausado") => damage = Some(cell),
            "derrubados" => knockdowns = Some(cell),
            key if key.contains("ressurgimento") => revives = Some(cell),
            _ => {}
        }
    }

    let player = match player {
        None => return Err(RowError::MissingField("player")),
        Some(cell) => coerce_string(Some(cell)).ok_or(RowError::EmptyField("player"))?,
    };

    Ok(PlayerRow {
        date: coerce_string(date),
        team: coerce_string(team),
        mode: coerce_string(mode),
        map: coerce_string(map),
        placement: coerce_count("posicao", placement).ok().flatten(),
        player,
        kills: coerce_count_lenient(kills),
        deaths: coerce_count_lenient(deaths),
        assists: coerce_count_lenient(assists),
        falls: coerce_count_lenient(falls),
        damage: coerce_count_lenient(damage),
        knockdowns: coerce_count_lenient(knockdowns),
        revives: coerce_count_lenient(revives),
    })
}
