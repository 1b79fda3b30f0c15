use super::{Input, Mode, ModeKind, PRESS_ENTER, Screen, Transition, parse_yes_no};
use crate::simulation::{SimulationContext, TradeAttempt};
use crate::trade::{TradeResolution, accept_offer};

#[derive(Debug)]
pub struct Trade {
    attempt: TradeAttempt,
    answer: Option<TradeResolution>,
}

pub fn create(ctx: &mut SimulationContext) -> Box<dyn Mode> {
    let attempt = if ctx.state.party.members.is_empty() {
        TradeAttempt::NoOffer
    } else {
        ctx.attempt_trade()
    };
    Box::new(Trade {
        attempt,
        answer: None,
    })
}

impl Mode for Trade {
    fn kind(&self) -> ModeKind {
        ModeKind::Trade
    }

    fn render(&self, _ctx: &SimulationContext) -> Screen {
        let screen = Screen::new("Trading");
        match (self.attempt, self.answer) {
            (TradeAttempt::AlreadyTried, _) => screen
                .line("You have already looked for traders today.")
                .prompt(PRESS_ENTER),
            (TradeAttempt::NoOffer, _) => screen
                .line("Nobody wants to trade with you today.")
                .prompt(PRESS_ENTER),
            (TradeAttempt::Offer(offer), None) => screen
                .line(offer.describe())
                .prompt("Are you willing to trade? (y/n)"),
            (TradeAttempt::Offer(_), Some(resolution)) => {
                let line = match resolution {
                    TradeResolution::Accepted => "The trade is made.",
                    TradeResolution::Unaffordable => "You don't have enough to make the trade.",
                    TradeResolution::Declined | TradeResolution::NoOffer => {
                        "The trader goes on their way."
                    }
                };
                screen.line(line).prompt(PRESS_ENTER)
            }
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        let TradeAttempt::Offer(offer) = self.attempt else {
            return Transition::Pop;
        };
        if self.answer.is_some() {
            return Transition::Pop;
        }
        let resolution = match parse_yes_no(input.trimmed()) {
            Some(true) => accept_offer(&mut ctx.state.vehicle.inventory, &offer, &ctx.policy.store),
            Some(false) => TradeResolution::Declined,
            None => return Transition::Stay,
        };
        if resolution == TradeResolution::Accepted {
            ctx.state.push_log(format!(
                "Traded {} for {}.",
                offer.give.kind.describe(offer.give.quantity),
                offer.receive.kind.describe(offer.receive.quantity)
            ));
        }
        self.answer = Some(resolution);
        Transition::Stay
    }
}
