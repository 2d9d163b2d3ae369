//! Builds the menu and score views from catalog state. Everything here is a pure
//! function of its arguments.

use super::view::{Action, ViewNode};
use crate::catalog::{MatchCatalog, MatchFilter};
use crate::constants::labels;
use crate::data_fetcher::models::{Match, ScoreOutcome};
use crate::data_fetcher::processors::format_table;
use crate::error::AppError;

/// Root menu: LIVE, GOLD and HOME_TEAM submenus, the UPCOMING listing, refresh, exit.
pub fn build_root_menu(catalog: &MatchCatalog) -> ViewNode {
    menu(
        labels::ROOT_TITLE,
        vec![
            submenu_button(labels::LIVE, catalog, MatchFilter::Live, true),
            submenu_button(labels::GOLD, catalog, MatchFilter::Gold, true),
            submenu_button(labels::HOME_TEAM, catalog, MatchFilter::HomeTeam, true),
            submenu_button(labels::UPCOMING, catalog, MatchFilter::Upcoming, false),
            ViewNode::button(labels::REFRESH, Action::Refresh),
            ViewNode::button(labels::EXIT, Action::Exit),
        ],
    )
}

fn submenu_button(
    title: &str,
    catalog: &MatchCatalog,
    filter: MatchFilter,
    drillable: bool,
) -> ViewNode {
    ViewNode::button(
        title,
        Action::OpenSubmenu {
            title: title.to_string(),
            view: Box::new(build_submenu(title, catalog.filter(filter), drillable)),
        },
    )
}

/// A titled list of matches. Drillable entries are buttons that open the score page;
/// the rest are plain text.
pub fn build_submenu<'a>(
    title: &str,
    matches: impl Iterator<Item = &'a Match>,
    drillable: bool,
) -> ViewNode {
    let mut items: Vec<ViewNode> = matches
        .map(|game| {
            if drillable {
                ViewNode::button(game.display_label(), build_match_action(game))
            } else {
                ViewNode::text(game.display_label())
            }
        })
        .collect();
    if items.is_empty() {
        items.push(ViewNode::text(labels::EMPTY_LIST));
    }
    menu(title, items)
}

/// The activation bound to a match entry.
pub fn build_match_action(game: &Match) -> Action {
    Action::ShowScore(game.clone())
}

/// Placeholder shown while the score fetch is running.
pub fn build_loading_view(game: &Match) -> ViewNode {
    score_page(game, ViewNode::text(labels::LOADING))
}

/// Score page for a finished fetch: the table, the no-score placeholder, or the error.
pub fn build_score_view(game: &Match, result: &Result<ScoreOutcome, AppError>) -> ViewNode {
    let body = match result {
        Ok(ScoreOutcome::Table(table)) => ViewNode::Text(format_table(table)),
        Ok(ScoreOutcome::NoScoreYet) => ViewNode::text(labels::NO_SCORE_YET),
        Err(e) => ViewNode::Text(format!("{}: {e}", labels::FETCH_FAILED)),
    };
    score_page(game, body)
}

fn score_page(game: &Match, body: ViewNode) -> ViewNode {
    ViewNode::Container(Box::new(ViewNode::List(vec![
        ViewNode::text(game.display_label()),
        ViewNode::divider(),
        body,
        ViewNode::divider(),
        ViewNode::button(labels::BACK, Action::Back),
    ])))
}

fn menu(title: &str, items: Vec<ViewNode>) -> ViewNode {
    let mut body = Vec::with_capacity(items.len() + 2);
    body.push(ViewNode::text(title));
    body.push(ViewNode::divider());
    body.extend(items);
    ViewNode::Container(Box::new(ViewNode::List(body)))
}
