use serde::{Deserialize, Serialize};

use crate::error::DetailError;
use crate::utils::capitalize;

/// Normalized Pokémon as shown on a card and in the arena.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Pokemon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    pub image: String,
    pub types: Vec<String>,
    pub stats: Stats,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_atk: u32,
    pub sp_def: u32,
    pub speed: u32,
}

/// Stat kinds in the order PokéAPI lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpAtk,
    SpDef,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpAtk,
        StatKind::SpDef,
        StatKind::Speed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "ATK",
            StatKind::Defense => "DEF",
            StatKind::SpAtk => "SpA",
            StatKind::SpDef => "SpD",
            StatKind::Speed => "SPD",
        }
    }
}

impl Stats {
    /// Map the six `base_stat` values positionally (hp first, speed last).
    pub fn from_base_stats(values: &[u32]) -> Option<Self> {
        match *values {
            [hp, attack, defense, sp_atk, sp_def, speed] => Some(Self {
                hp,
                attack,
                defense,
                sp_atk,
                sp_def,
                speed,
            }),
            _ => None,
        }
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAtk => self.sp_atk,
            StatKind::SpDef => self.sp_def,
            StatKind::Speed => self.speed,
        }
    }

    /// Base-stat total, widened so six `u32` values cannot overflow.
    pub fn total(&self) -> u64 {
        StatKind::ALL.iter().map(|&k| u64::from(self.get(k))).sum()
    }

    pub fn max(&self) -> u32 {
        StatKind::ALL
            .iter()
            .map(|&k| self.get(k))
            .max()
            .unwrap_or(0)
    }
}

impl Pokemon {
    /// Build the display shape from an index entry and its detail payload.
    ///
    /// The name comes from the index summary; the detail payload supplies the
    /// id, artwork, types and stats.
    pub fn from_remote(
        summary: &RemotePokemonSummary,
        detail: RemotePokemonDetail,
    ) -> Result<Self, DetailError> {
        let base: Vec<u32> = detail.stats.iter().map(|s| s.base_stat).collect();
        let stats = Stats::from_base_stats(&base).ok_or(DetailError::Malformed {
            reason: format!("expected 6 stats, got {}", base.len()),
        })?;

        let image = detail.sprites.preferred_image().unwrap_or_default();
        let types = detail
            .types
            .into_iter()
            .map(|slot| slot.kind.name.to_lowercase())
            .collect();

        Ok(Self {
            id: detail.id,
            name: capitalize(&summary.name),
            image,
            types,
            stats,
        })
    }

    pub fn has_type(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(ty))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RemotePokemonSummary {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RemotePokemonIndex {
    pub results: Vec<RemotePokemonSummary>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemotePokemonDetail {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub sprites: RemoteSprites,
    pub types: Vec<RemoteTypeSlot>,
    pub stats: Vec<RemoteStat>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RemoteSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<RemoteOtherSprites>,
}

impl RemoteSprites {
    /// Official artwork when it is non-empty, otherwise the plain front sprite.
    pub fn preferred_image(&self) -> Option<String> {
        let artwork = self
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .filter(|url| !url.is_empty());

        artwork
            .or_else(|| self.front_default.as_deref().filter(|url| !url.is_empty()))
            .map(str::to_string)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RemoteOtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<RemoteArtwork>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RemoteArtwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteStat {
    pub base_stat: u32,
}
