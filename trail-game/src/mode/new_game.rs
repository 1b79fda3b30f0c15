//! Party setup: profession, names and departure month.

use super::command::menu_command;
use super::{
    Input, MenuCommand, Mode, ModeKind, PRESS_ENTER, Screen, Transition, menu_lines, parse_choice,
    parse_yes_no,
};
use crate::calendar::{DEPARTURE_MONTHS, month_name};
use crate::entity::{Entity, Person, Profession};
use crate::numbers::format_cents;
use crate::simulation::SimulationContext;

const DEFAULT_COMPANIONS: [&str; 7] = ["Mary", "Jed", "Sara", "Zeke", "Ann", "Eli", "Ruth"];
const ORDINALS: [&str; 7] = [
    "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
];

menu_command! {
    pub enum ProfessionCommand {
        Banker = 1 => "Be a banker from Boston",
        Carpenter = 2 => "Be a carpenter from Ohio",
        Farmer = 3 => "Be a farmer from Illinois",
        Differences = 4 => "Find out the differences between these choices",
    }
}

/// Accept a first name of letters, spaces, apostrophes and hyphens.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    regex::Regex::new(r"^[A-Za-z][A-Za-z '\-]{0,11}$")
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Profession,
    Differences,
    LeaderName,
    MemberName(usize),
    Confirm,
    Month,
    MonthAdvice,
}

#[derive(Debug)]
pub struct NewGame {
    form: Form,
    profession: Profession,
    leader: String,
    companions: Vec<String>,
    companion_slots: usize,
    rejected: Option<String>,
}

pub fn create(ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(NewGame {
        form: Form::Profession,
        profession: Profession::Banker,
        leader: String::new(),
        companions: Vec::new(),
        companion_slots: usize::from(ctx.policy.party_size.saturating_sub(1)).min(ORDINALS.len()),
        rejected: None,
    })
}

impl NewGame {
    fn accept_name(&mut self, input: &str) -> Option<String> {
        let name = input.trim();
        if !is_valid_name(name) {
            self.rejected = Some(format!("\"{name}\" is not a name we can write down."));
            return None;
        }
        if self.is_taken(name) {
            self.rejected = Some(format!("There is already a {name} in the party."));
            return None;
        }
        self.rejected = None;
        Some(name.to_string())
    }

    /// Names already in the party, compared by entity key.
    fn is_taken(&self, name: &str) -> bool {
        let key = Person::new(name).key();
        std::iter::once(&self.leader)
            .chain(&self.companions)
            .any(|taken| Person::new(taken.as_str()).key() == key)
    }

    /// First default companion name, starting at `idx`, not already used.
    fn default_companion(&mut self, idx: usize) -> Option<String> {
        let picked = (0..DEFAULT_COMPANIONS.len())
            .map(|offset| DEFAULT_COMPANIONS[(idx + offset) % DEFAULT_COMPANIONS.len()])
            .find(|name| !self.is_taken(name));
        match picked {
            Some(name) => {
                self.rejected = None;
                Some(name.to_string())
            }
            None => {
                self.rejected = Some("We are out of names. Please type one.".to_string());
                None
            }
        }
    }
}

impl Mode for NewGame {
    fn kind(&self) -> ModeKind {
        ModeKind::NewGame
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let screen = match self.form {
            Form::Profession => Screen::new("Many kinds of people made the trip to Oregon.")
                .line("You may:")
                .blank()
                .lines(ProfessionCommand::menu())
                .prompt("What is your choice?"),
            Form::Differences => {
                let mut screen = Screen::new("Traveling to Oregon isn't easy!");
                for profession in Profession::ALL {
                    let spec = ctx.policy.profession(profession);
                    screen = screen.line(format!(
                        "  A {} starts with {} and scores x{}.",
                        profession.label(),
                        format_cents(spec.starting_cash_cents),
                        spec.score_mult
                    ));
                }
                screen
                    .blank()
                    .line("The more money you start with, the fewer points you earn.")
                    .prompt(PRESS_ENTER)
            }
            Form::LeaderName => Screen::new("Party leader")
                .prompt("What is the first name of the wagon leader?"),
            Form::MemberName(idx) => Screen::new("Party members")
                .line(format!("  1. {}", self.leader))
                .lines(
                    self.companions
                        .iter()
                        .enumerate()
                        .map(|(pos, name)| format!("  {}. {name}", pos + 2)),
                )
                .blank()
                .line("Leave the line empty to let us pick a name.")
                .prompt(format!(
                    "What is the first name of the {} member in the party?",
                    ORDINALS.get(idx).copied().unwrap_or("next")
                )),
            Form::Confirm => Screen::new("Party members")
                .line(format!("  1. {}", self.leader))
                .lines(
                    self.companions
                        .iter()
                        .enumerate()
                        .map(|(pos, name)| format!("  {}. {name}", pos + 2)),
                )
                .prompt("Are these names correct? (y/n)"),
            Form::Month => {
                let months: Vec<&str> = DEPARTURE_MONTHS.iter().map(|m| month_name(*m)).collect();
                let mut labels: Vec<String> = months.iter().map(|m| (*m).to_string()).collect();
                labels.push("Ask for advice".to_string());
                Screen::new("It is 1848. Your jumping off place for Oregon is Independence, Missouri.")
                    .line("You must decide which month to leave Independence.")
                    .blank()
                    .lines(menu_lines(&labels))
                    .prompt("What is your choice?")
            }
            Form::MonthAdvice => Screen::new("Advice")
                .line("You attend a public meeting held for folks with the California - Oregon fever.")
                .line("If you leave too early, there won't be any grass for your oxen to eat.")
                .line("If you leave too late, you may not get to Oregon before winter comes.")
                .line("If you leave at just the right time, there will be green grass and the weather will be cool.")
                .prompt(PRESS_ENTER),
        };
        match &self.rejected {
            Some(message) => screen.blank().line(message.clone()),
            None => screen,
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        let text = input.trimmed();
        match self.form {
            Form::Profession => match ProfessionCommand::parse(text) {
                Some(ProfessionCommand::Banker) => self.pick(Profession::Banker),
                Some(ProfessionCommand::Carpenter) => self.pick(Profession::Carpenter),
                Some(ProfessionCommand::Farmer) => self.pick(Profession::Farmer),
                Some(ProfessionCommand::Differences) => self.form = Form::Differences,
                None => {}
            },
            Form::Differences => self.form = Form::Profession,
            Form::LeaderName => {
                self.leader.clear();
                self.companions.clear();
                if let Some(name) = self.accept_name(text) {
                    self.leader = name;
                    self.form = if self.companion_slots == 0 {
                        Form::Confirm
                    } else {
                        Form::MemberName(0)
                    };
                }
            }
            Form::MemberName(idx) => {
                let name = if text.is_empty() {
                    self.default_companion(idx)
                } else {
                    self.accept_name(text)
                };
                if let Some(name) = name {
                    self.companions.push(name);
                    self.form = if idx + 1 < self.companion_slots {
                        Form::MemberName(idx + 1)
                    } else {
                        Form::Confirm
                    };
                }
            }
            Form::Confirm => match parse_yes_no(text) {
                Some(true) => self.form = Form::Month,
                Some(false) => self.form = Form::LeaderName,
                None => {}
            },
            Form::Month => {
                let Some(choice) = parse_choice(text, DEPARTURE_MONTHS.len() + 1) else {
                    return Transition::Stay;
                };
                let Some(month) = DEPARTURE_MONTHS.get(choice).copied() else {
                    self.form = Form::MonthAdvice;
                    return Transition::Stay;
                };
                ctx.new_game(&self.leader, self.profession, self.companions.clone(), month);
                return Transition::Replace(ModeKind::Travel);
            }
            Form::MonthAdvice => self.form = Form::Month,
        }
        Transition::Stay
    }
}

impl NewGame {
    const fn pick(&mut self, profession: Profession) {
        self.profession = profession;
        self.form = Form::LeaderName;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TrailPolicy;

    fn feed(mode: &mut Box<dyn Mode>, ctx: &mut SimulationContext, lines: &[&str]) -> Transition {
        let mut last = Transition::Stay;
        for line in lines {
            last = mode.on_input(ctx, &(*line).into());
        }
        last
    }

    #[test]
    fn names_are_validated() {
        assert!(is_valid_name("Ezra"));
        assert!(is_valid_name("Mary-Ann"));
        assert!(is_valid_name("O'Neil"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1Ezra"));
        assert!(!is_valid_name("Bartholomewson"));
    }

    #[test]
    fn full_setup_starts_a_journey() {
        let mut ctx = SimulationContext::new(5, TrailPolicy::default());
        let mut mode = create(&mut ctx);
        let last = feed(
            &mut mode,
            &mut ctx,
            &["3", "Ezra", "Mary", "", "Sara", "Zeke", "y", "2"],
        );
        assert_eq!(last, Transition::Replace(ModeKind::Travel));
        let names: Vec<&str> = ctx.state.party.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Ezra", "Mary", "Jed", "Sara", "Zeke"]);
        assert_eq!(ctx.state.party.profession(), Some(Profession::Farmer));
        assert_eq!(ctx.state.date.month, 4);
        assert_eq!(ctx.state.vehicle.inventory.cash_cents, 40_000);
    }

    #[test]
    fn rejected_names_reprompt() {
        let mut ctx = SimulationContext::new(5, TrailPolicy::default());
        let mut mode = create(&mut ctx);
        feed(&mut mode, &mut ctx, &["1", "42"]);
        assert!(mode.render(&ctx).body.iter().any(|l| l.contains("\"42\"")));
        feed(&mut mode, &mut ctx, &["Hattie"]);
        assert!(mode.render(&ctx).prompt.contains("second member"));
    }

    #[test]
    fn party_names_must_be_distinct() {
        let mut ctx = SimulationContext::new(5, TrailPolicy::default());
        let mut mode = create(&mut ctx);
        feed(&mut mode, &mut ctx, &["1", "Mary", "MARY"]);
        assert!(mode.render(&ctx).body.iter().any(|l| l.contains("already a MARY")));
        assert!(mode.render(&ctx).prompt.contains("second member"));
        let last = feed(&mut mode, &mut ctx, &["", "Zeke", "", "", "y", "2"]);
        assert_eq!(last, Transition::Replace(ModeKind::Travel));
        let names: Vec<&str> = ctx.state.party.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Mary", "Jed", "Zeke", "Sara", "Ann"]);
    }

    #[test]
    fn declining_the_names_starts_over() {
        let mut ctx = SimulationContext::new(5, TrailPolicy::default());
        let mut mode = create(&mut ctx);
        feed(&mut mode, &mut ctx, &["2", "Ezra", "", "", "", "", "n"]);
        assert!(mode.render(&ctx).prompt.contains("wagon leader"));
        let last = feed(&mut mode, &mut ctx, &["Mary", "", "", "", "", "y", "6", "", "1"]);
        assert_eq!(last, Transition::Replace(ModeKind::Travel));
        assert_eq!(ctx.state.party.members[0].name, "Mary");
        assert_eq!(ctx.state.party.members[1].name, "Jed");
        assert_eq!(ctx.state.date.month, 3);
    }
}
