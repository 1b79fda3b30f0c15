use super::{Input, Mode, ModeKind, Screen, Transition, parse_choice};
use crate::entity::SupplyKind;
use crate::numbers::format_cents;
use crate::simulation::SimulationContext;
use crate::store::{
    StoreLine, apply_purchase, price_cents_at_stage, quote_purchase, remaining_capacity,
    units_per_purchase,
};
use crate::trail::START_LOCATION;

const CLEAR_CHOICE: usize = SupplyKind::GOODS.len();
const CHECKOUT_CHOICE: usize = SupplyKind::GOODS.len() + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Cart,
    Quantity(SupplyKind),
}

/// Settlement general store. Goods are collected in a cart and paid for at
/// checkout.
#[derive(Debug)]
pub struct Store {
    form: Form,
    stage: u8,
    store_name: &'static str,
    cart: Vec<StoreLine>,
    message: Option<String>,
}

pub fn create(ctx: &mut SimulationContext) -> Box<dyn Mode> {
    let location = ctx.state.location();
    Box::new(Store {
        form: Form::Cart,
        stage: location.and_then(|loc| loc.price_stage()).unwrap_or(0),
        store_name: location.map_or("General store", |loc| loc.name),
        cart: Vec::new(),
        message: None,
    })
}

impl Store {
    fn in_cart(&self, item: SupplyKind) -> u32 {
        self.cart
            .iter()
            .find(|line| line.item == item)
            .map_or(0, |line| line.quantity)
    }

    fn cart_with(&self, item: SupplyKind, quantity: u32) -> Vec<StoreLine> {
        let mut cart: Vec<StoreLine> = self
            .cart
            .iter()
            .copied()
            .filter(|line| line.item != item)
            .collect();
        if quantity > 0 {
            cart.push(StoreLine { item, quantity });
        }
        cart
    }

    fn set_quantity(&mut self, ctx: &SimulationContext, item: SupplyKind, text: &str) {
        let Ok(quantity) = text.parse::<u32>() else {
            self.message = Some(format!("\"{text}\" is not a number."));
            return;
        };
        let cart = self.cart_with(item, quantity);
        match quote_purchase(
            &ctx.policy.store,
            self.stage,
            &ctx.state.vehicle.inventory,
            &cart,
        ) {
            Ok(_) => {
                self.cart = cart;
                self.message = None;
                self.form = Form::Cart;
            }
            Err(err) => self.message = Some(format!("Sorry, {err}.")),
        }
    }

    fn checkout(&mut self, ctx: &mut SimulationContext) -> Transition {
        let departing = ctx.state.days_elapsed == 0 && ctx.state.progress.current == START_LOCATION;
        let store = &ctx.policy.store;
        match apply_purchase(store, self.stage, &mut ctx.state.vehicle.inventory, &self.cart) {
            Ok(receipt) => {
                self.cart.clear();
                if receipt.total_cost_cents > 0 {
                    ctx.state.push_log(format!(
                        "Bought supplies at {} for {}.",
                        self.store_name,
                        format_cents(receipt.total_cost_cents)
                    ));
                }
            }
            Err(err) => {
                self.message = Some(format!("Sorry, {err}."));
                return Transition::Stay;
            }
        }
        if departing && ctx.state.vehicle.inventory.oxen < ctx.policy.travel.min_oxen_to_move {
            self.message = Some("Don't forget, you'll need oxen to pull your wagon.".to_string());
            return Transition::Stay;
        }
        Transition::Pop
    }
}

impl Mode for Store {
    fn kind(&self) -> ModeKind {
        ModeKind::Store
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let store = &ctx.policy.store;
        let inventory = &ctx.state.vehicle.inventory;
        let screen = match self.form {
            Form::Cart => {
                let mut screen = Screen::new(format!("{} general store", self.store_name))
                    .line(ctx.state.date.to_string())
                    .blank();
                for (idx, item) in SupplyKind::GOODS.into_iter().enumerate() {
                    let price = price_cents_at_stage(store, item, self.stage).unwrap_or(0);
                    let unit = if item == SupplyKind::Ammunition {
                        format!("box of {}", units_per_purchase(store, item))
                    } else {
                        "each".to_string()
                    };
                    screen = screen.line(format!(
                        "  {}. {:<14} {:>8} {unit:<10} have {:>5}  cart {:>4}",
                        idx + 1,
                        item.label(),
                        format_cents(price),
                        inventory.quantity(item),
                        self.in_cart(item)
                    ));
                }
                let total = quote_purchase(store, self.stage, inventory, &self.cart)
                    .map_or(0, |receipt| receipt.total_cost_cents);
                screen
                    .line(format!("  {}. Clear the cart", CLEAR_CHOICE + 1))
                    .line(format!("  {}. Pay and leave", CHECKOUT_CHOICE + 1))
                    .blank()
                    .line(format!("Total bill: {}", format_cents(total)))
                    .line(format!(
                        "Amount you have: {}",
                        format_cents(inventory.cash_cents)
                    ))
                    .prompt("Which item would you like to buy?")
            }
            Form::Quantity(item) => {
                let room = remaining_capacity(store, inventory, item);
                let noun = if item == SupplyKind::Ammunition {
                    "boxes of ammunition".to_string()
                } else {
                    item.unit().to_string()
                };
                Screen::new(format!("{} general store", self.store_name))
                    .line(format!("You can carry {room} more {noun}."))
                    .prompt(format!("How many {noun} do you want?"))
            }
        };
        match &self.message {
            Some(message) => screen.blank().line(message.clone()),
            None => screen,
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        let text = input.trimmed();
        match self.form {
            Form::Quantity(item) => {
                if text.is_empty() {
                    self.form = Form::Cart;
                    self.message = None;
                } else {
                    self.set_quantity(ctx, item, text);
                }
                Transition::Stay
            }
            Form::Cart => match parse_choice(text, CHECKOUT_CHOICE + 1) {
                Some(CLEAR_CHOICE) => {
                    self.cart.clear();
                    self.message = None;
                    Transition::Stay
                }
                Some(CHECKOUT_CHOICE) => self.checkout(ctx),
                Some(idx) => {
                    if let Some(item) = SupplyKind::GOODS.get(idx).copied() {
                        self.form = Form::Quantity(item);
                        self.message = None;
                    }
                    Transition::Stay
                }
                None => Transition::Stay,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Profession;
    use crate::policy::TrailPolicy;

    fn fresh() -> SimulationContext {
        let mut ctx = SimulationContext::new(9, TrailPolicy::default());
        ctx.new_game("Ezra", Profession::Banker, ["Mary"], 3);
        ctx
    }

    fn feed(mode: &mut Box<dyn Mode>, ctx: &mut SimulationContext, lines: &[&str]) -> Transition {
        let mut last = Transition::Stay;
        for line in lines {
            last = mode.on_input(ctx, &(*line).into());
        }
        last
    }

    #[test]
    fn buying_a_cart_charges_at_checkout() {
        let mut ctx = fresh();
        let mut store = create(&mut ctx);
        let last = feed(&mut store, &mut ctx, &["1", "6", "2", "500", "4", "5", "9"]);
        assert_eq!(last, Transition::Pop);
        let inventory = &ctx.state.vehicle.inventory;
        assert_eq!(inventory.oxen, 6);
        assert_eq!(inventory.food_lbs, 500);
        assert_eq!(inventory.bullets, 100);
        // 6 oxen $120, 500 lbs $100, 5 boxes $10
        assert_eq!(inventory.cash_cents, 160_000 - 23_000);
    }

    #[test]
    fn over_cap_quantities_are_refused() {
        let mut ctx = fresh();
        let mut store = create(&mut ctx);
        feed(&mut store, &mut ctx, &["5", "4"]);
        let screen = store.render(&ctx);
        assert!(screen.body.iter().any(|l| l.starts_with("Sorry")));
        feed(&mut store, &mut ctx, &["3"]);
        assert!(store.render(&ctx).body.iter().any(|l| l.contains("cart    3")));
    }

    #[test]
    fn leaving_independence_requires_oxen() {
        let mut ctx = fresh();
        let mut store = create(&mut ctx);
        assert_eq!(feed(&mut store, &mut ctx, &["9"]), Transition::Stay);
        assert!(store.render(&ctx).body.iter().any(|l| l.contains("need oxen")));
        assert_eq!(feed(&mut store, &mut ctx, &["1", "2", "9"]), Transition::Pop);
    }

    #[test]
    fn clearing_the_cart_spends_nothing() {
        let mut ctx = fresh();
        ctx.state.vehicle.inventory.oxen = 4;
        let mut store = create(&mut ctx);
        feed(&mut store, &mut ctx, &["2", "300", "8"]);
        assert_eq!(feed(&mut store, &mut ctx, &["9"]), Transition::Pop);
        assert_eq!(ctx.state.vehicle.inventory.cash_cents, 160_000);
        assert_eq!(ctx.state.vehicle.inventory.food_lbs, 0);
    }
}
