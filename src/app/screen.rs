// SPDX-License-Identifier: MPL-2.0
//! Screen routes and the navigation stack.

use crate::media::{Album, VideoAsset};

/// A screen together with the parameters it was opened with.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Onboarding,
    Directories,
    Videos { album: Album },
    Player { video: VideoAsset },
}

impl Route {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Route::Onboarding => "onboarding",
            Route::Directories => "directories",
            Route::Videos { .. } => "videos",
            Route::Player { .. } => "player",
        }
    }
}

/// Stack of routes. Never empty: the root stays in place when going back.
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    /// Onboarding until it has been completed once, the album list afterwards.
    #[must_use]
    pub fn initial(onboarding_visited: bool) -> Self {
        let root = if onboarding_visited {
            Route::Directories
        } else {
            Route::Onboarding
        };
        Self { stack: vec![root] }
    }

    #[must_use]
    pub fn current(&self) -> &Route {
        // The stack always holds its root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        tracing::info!("navigating to {}", route.name());
        self.stack.push(route);
    }

    /// Swaps the top route, e.g. leaving onboarding for good.
    pub fn replace(&mut self, route: Route) {
        tracing::info!("replacing {} with {}", self.current().name(), route.name());
        self.stack.pop();
        self.stack.push(route);
    }

    /// Pops the top route. Returns the popped route, or `None` at the root.
    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        let popped = self.stack.pop();
        tracing::info!("back to {}", self.current().name());
        popped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::AlbumId;
    use std::path::PathBuf;

    fn album() -> Album {
        Album {
            id: AlbumId::new("/videos/trips"),
            title: "trips".into(),
            asset_count: 1,
            path: PathBuf::from("/videos/trips"),
        }
    }

    #[test]
    fn initial_route_depends_on_onboarding_flag() {
        assert_eq!(Router::initial(false).current(), &Route::Onboarding);
        assert_eq!(Router::initial(true).current(), &Route::Directories);
    }

    #[test]
    fn back_at_root_is_a_no_op() {
        let mut router = Router::initial(true);
        assert_eq!(router.back(), None);
        assert_eq!(router.len(), 1);
        assert_eq!(router.current(), &Route::Directories);
    }

    #[test]
    fn replace_swaps_the_top() {
        let mut router = Router::initial(false);
        router.replace(Route::Directories);
        assert_eq!(router.len(), 1);
        assert_eq!(router.current(), &Route::Directories);
        assert_eq!(router.back(), None);
    }

    #[test]
    fn forward_chain_and_back() {
        let mut router = Router::initial(true);
        router.push(Route::Videos { album: album() });
        let video = VideoAsset::from_path(PathBuf::from("/videos/trips/a.mp4"), 1_000);
        router.push(Route::Player {
            video: video.clone(),
        });
        assert_eq!(router.len(), 3);

        assert_eq!(router.back(), Some(Route::Player { video }));
        assert_eq!(router.current(), &Route::Videos { album: album() });
        assert!(!router.is_empty());
    }
}
