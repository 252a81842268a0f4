mod cheats;
mod test_helpers;
mod transactions;
