//! Per-observer cell presentation.
//!
//! Resolves what each faction is shown for a cell: an image reference and
//! a color code. Token identity is asymmetric -- the mobile unit is
//! hidden from the hunter until the match ends -- and color precedence is
//! token base color first, then annotation marker, then background.

use crate::annotate::Marker;
use crate::board::{Faction, Token};

/// Image reference for a cell. Walls and roadblocks render as color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenImage {
    Unit,
    Village,
    Tower,
}

/// Display color code for a cell, as seen by one observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    /// Background.
    Default,
    /// An impassable wall.
    Blocked,
    /// A token of the observer's own faction.
    Friendly,
    /// A revealed token of the opposing faction.
    Enemy,
    /// A legal destination for the observer this turn.
    OwnReachable,
    /// A legal destination inside the observer's own influence.
    ReachableFriendly,
    /// Inside the observer's own influence only.
    FriendlyInfluence,
    /// A legal destination inside the opponent's influence.
    ReachableEnemy,
    /// Inside the opponent's influence only.
    EnemyInfluence,
}

impl CellColor {
    /// The CSS color code handed to the rendering collaborator.
    pub const fn as_hex(self) -> &'static str {
        match self {
            CellColor::Default => "#FFFFFF",
            CellColor::Blocked => "#000000",
            CellColor::Friendly => "#00AA00",
            CellColor::Enemy => "#AA0000",
            CellColor::OwnReachable => "#74C3ED",
            CellColor::ReachableFriendly => "#74EDED",
            CellColor::FriendlyInfluence => "#9EF79E",
            CellColor::ReachableEnemy => "#CDC3ED",
            CellColor::EnemyInfluence => "#F79E9E",
        }
    }
}

/// What one observer is shown for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub image: Option<TokenImage>,
    pub color: CellColor,
}

impl CellView {
    /// Resolves the view of a cell for `observer`.
    pub fn of(token: Token, marker: Option<Marker>, observer: Faction, done: bool) -> Self {
        let color = base_color(token, observer, done)
            .or_else(|| marker.map(marker_color))
            .unwrap_or(CellColor::Default);
        CellView {
            image: image(token, observer, done),
            color,
        }
    }
}

/// The image an observer sees for a token.
///
/// The unit's true identity is hidden from the hunter while the match is
/// live: it shows as a village when standing on one, as nothing otherwise.
fn image(token: Token, observer: Faction, done: bool) -> Option<TokenImage> {
    match token {
        Token::Unit { on_village } => match observer {
            Faction::Survivor => Some(TokenImage::Unit),
            Faction::Hunter if done => Some(TokenImage::Unit),
            Faction::Hunter if on_village => Some(TokenImage::Village),
            Faction::Hunter => None,
        },
        Token::Village { .. } => Some(TokenImage::Village),
        Token::Tower { .. } => Some(TokenImage::Tower),
        _ => None,
    }
}

/// A token's own color claim, taking precedence over markers.
fn base_color(token: Token, observer: Faction, done: bool) -> Option<CellColor> {
    match token {
        Token::Wall => Some(CellColor::Blocked),
        Token::Unit { .. } => match observer {
            Faction::Survivor => Some(CellColor::Friendly),
            Faction::Hunter if done => Some(CellColor::Enemy),
            Faction::Hunter => None,
        },
        // Organization is visible to the hunter at once, to the survivor
        // only in the post-mortem.
        Token::Village { organized: true } => match observer {
            Faction::Hunter => Some(CellColor::Friendly),
            Faction::Survivor if done => Some(CellColor::Enemy),
            Faction::Survivor => None,
        },
        Token::Roadblock { .. } | Token::Tower { .. } => match observer {
            Faction::Hunter => Some(CellColor::Friendly),
            Faction::Survivor => Some(CellColor::Enemy),
        },
        _ => None,
    }
}

const fn marker_color(marker: Marker) -> CellColor {
    match marker {
        Marker::Reachable => CellColor::OwnReachable,
        Marker::ReachableFriendly => CellColor::ReachableFriendly,
        Marker::ReachableEnemy => CellColor::ReachableEnemy,
        Marker::FriendlyInfluence => CellColor::FriendlyInfluence,
        Marker::EnemyInfluence => CellColor::EnemyInfluence,
    }
}
