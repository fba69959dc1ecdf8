/// A navigable destination in the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub keywords: &'static [&'static str],
    pub path: &'static str,
    /// Spoken name of the destination.
    pub label: &'static str,
}

/// Route keyword table. Order is the tie-break when several keywords appear.
pub const ROUTES: &[Route] = &[
    Route { keywords: &["dashboard", "home"], path: "/", label: "dashboard" },
    Route { keywords: &["tasks", "task"], path: "/tasks", label: "tasks" },
    Route { keywords: &["finances", "finance", "money"], path: "/finances", label: "finances" },
    Route { keywords: &["voice"], path: "/voice", label: "voice commands" },
    Route { keywords: &["ai", "chat"], path: "/ai-chat", label: "AI chat" },
    Route { keywords: &["analytics"], path: "/analytics", label: "analytics" },
    Route { keywords: &["settings"], path: "/settings", label: "settings" },
];

/// First route (in table order) whose keyword appears as a whole word.
pub fn match_route(text: &str) -> Option<&'static Route> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    ROUTES
        .iter()
        .find(|route| route.keywords.iter().any(|kw| words.contains(kw)))
}

/// Reverse lookup used when speaking a navigation result.
pub fn route_for_path(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.path == path)
}
