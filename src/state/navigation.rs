//! Navigation-related state types.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Quests,
    CreateQuest,
    EditQuest,
}

/// Tab partition over the quest list.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum QuestTab {
    All,
    Main,
    Side,
}

impl QuestTab {
    pub const ALL: [QuestTab; 3] = [QuestTab::All, QuestTab::Main, QuestTab::Side];

    pub fn next(&self) -> QuestTab {
        match self {
            QuestTab::All => QuestTab::Main,
            QuestTab::Main => QuestTab::Side,
            QuestTab::Side => QuestTab::All,
        }
    }

    pub fn prev(&self) -> QuestTab {
        match self {
            QuestTab::All => QuestTab::Side,
            QuestTab::Main => QuestTab::All,
            QuestTab::Side => QuestTab::Main,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuestTab::All => "all",
            QuestTab::Main => "main",
            QuestTab::Side => "side",
        }
    }

    pub fn from_name(name: &str) -> Option<QuestTab> {
        QuestTab::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// Status filter layered on top of tab filtering.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusFilter {
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive];

    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Inactive,
            StatusFilter::Inactive => StatusFilter::All,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    pub fn from_name(name: &str) -> Option<StatusFilter> {
        StatusFilter::ALL.into_iter().find(|f| f.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_tab_cycles() {
        let mut tab = QuestTab::All;
        for _ in 0..QuestTab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, QuestTab::All);
        assert_eq!(QuestTab::Main.prev(), QuestTab::All);
        assert_eq!(QuestTab::All.prev(), QuestTab::Side);
    }

    #[test]
    fn test_quest_tab_names_round_trip() {
        for tab in QuestTab::ALL {
            assert_eq!(QuestTab::from_name(tab.name()), Some(tab));
        }
        assert_eq!(QuestTab::from_name("bogus"), None);
    }

    #[test]
    fn test_status_filter_cycles() {
        let mut filter = StatusFilter::All;
        for _ in 0..StatusFilter::ALL.len() {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::All);
    }

    #[test]
    fn test_status_filter_names_round_trip() {
        for filter in StatusFilter::ALL {
            assert_eq!(StatusFilter::from_name(filter.name()), Some(filter));
        }
    }
}
