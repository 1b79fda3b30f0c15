use super::command::menu_command;
use super::{Input, MenuCommand, Mode, ModeKind, PRESS_ENTER, Screen, Transition};
use crate::simulation::SimulationContext;

menu_command! {
    pub enum MainMenuCommand {
        TravelTheTrail = 1 => "Travel the trail",
        LearnAboutTheTrail = 2 => "Learn about the trail",
        SeeTopTen = 3 => "See the Oregon Top Ten",
        ContinueSavedGame = 4 => "Continue a saved journey",
        ManagementOptions = 5 => "Choose management options",
        ExitSimulation = 6 => "End",
    }
}

const LEARN_PAGES: [&str; 4] = [
    "Try taking a journey by covered wagon across 2,000 miles of plains, rivers and \
     mountains. On the plains, will you slosh your oxen through mud and water-filled \
     ruts, or will you plod through dust six inches deep?",
    "How will you cross the rivers? If you have money, you might take a ferry. Or you \
     can caulk your wagon and float it across, or try to ford the river. Where the \
     Snake River runs fast you can hire an Indian guide.",
    "What about supplies? Well, if you're low on food you can hunt. You might get a \
     buffalo, but you will only be able to carry so much meat back to the wagon. \
     Forts along the way sell supplies, at rising prices.",
    "If for some reason you don't survive, your wagon burns, or thieves steal your \
     oxen, or you run out of provisions, or you die of cholera, don't give up! Try \
     again, and again, until your name is up there with the others on the Oregon Top Ten.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Menu,
    Learn(usize),
    NoSave,
}

#[derive(Debug)]
pub struct MainMenu {
    form: Form,
}

pub fn create(_ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(MainMenu { form: Form::Menu })
}

impl Mode for MainMenu {
    fn kind(&self) -> ModeKind {
        ModeKind::MainMenu
    }

    fn render(&self, _ctx: &SimulationContext) -> Screen {
        match self.form {
            Form::Menu => Screen::new("Westward: the Oregon Trail")
                .line("You may:")
                .blank()
                .lines(MainMenuCommand::menu())
                .prompt("What is your choice?"),
            Form::Learn(page) => Screen::new("Learn about the trail")
                .line(LEARN_PAGES.get(page).copied().unwrap_or_default())
                .prompt(PRESS_ENTER),
            Form::NoSave => Screen::new("Continue a saved journey")
                .line("There is no saved journey to continue.")
                .prompt(PRESS_ENTER),
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        match self.form {
            Form::Menu => {}
            Form::Learn(page) => {
                self.form = if page + 1 < LEARN_PAGES.len() {
                    Form::Learn(page + 1)
                } else {
                    Form::Menu
                };
                return Transition::Stay;
            }
            Form::NoSave => {
                self.form = Form::Menu;
                return Transition::Stay;
            }
        }
        let Some(command) = MainMenuCommand::parse(input.trimmed()) else {
            return Transition::Stay;
        };
        match command {
            MainMenuCommand::TravelTheTrail => Transition::Push(ModeKind::NewGame),
            MainMenuCommand::LearnAboutTheTrail => {
                self.form = Form::Learn(0);
                Transition::Stay
            }
            MainMenuCommand::SeeTopTen => Transition::Push(ModeKind::HighScores),
            MainMenuCommand::ContinueSavedGame => {
                if ctx.restore_saved() {
                    Transition::Push(ModeKind::Travel)
                } else {
                    self.form = Form::NoSave;
                    Transition::Stay
                }
            }
            MainMenuCommand::ManagementOptions => Transition::Push(ModeKind::Options),
            MainMenuCommand::ExitSimulation => Transition::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TrailPolicy;

    #[test]
    fn menu_commands_route_to_modes() {
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        let mut menu = create(&mut ctx);
        assert_eq!(menu.on_input(&mut ctx, &"1".into()), Transition::Push(ModeKind::NewGame));
        assert_eq!(menu.on_input(&mut ctx, &"3".into()), Transition::Push(ModeKind::HighScores));
        assert_eq!(menu.on_input(&mut ctx, &"6".into()), Transition::Exit);
        assert_eq!(menu.on_input(&mut ctx, &"9".into()), Transition::Stay);
    }

    #[test]
    fn learning_pages_through_then_returns() {
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        let mut menu = create(&mut ctx);
        menu.on_input(&mut ctx, &"2".into());
        assert!(menu.render(&ctx).body[0].contains("covered wagon"));
        for _ in 0..LEARN_PAGES.len() {
            assert_eq!(menu.on_input(&mut ctx, &"".into()), Transition::Stay);
        }
        assert!(menu.render(&ctx).body.iter().any(|l| l.contains("Travel the trail")));
    }

    #[test]
    fn continue_without_save_explains() {
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        let mut menu = create(&mut ctx);
        assert_eq!(menu.on_input(&mut ctx, &"4".into()), Transition::Stay);
        assert!(menu.render(&ctx).body[0].contains("no saved journey"));
        ctx.save_game();
        menu.on_input(&mut ctx, &"".into());
        assert_eq!(menu.on_input(&mut ctx, &"4".into()), Transition::Push(ModeKind::Travel));
    }
}
