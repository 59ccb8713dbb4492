use common::error::StoreError;
use common::model::{CardId, Collection};
use common::sync::LoadTicket;

pub enum Msg {
    Load,
    Loaded(LoadTicket, Result<Collection, StoreError>),
    Toggle(CardId, bool),
    SearchInput(String),
    Save,
    Saved(Result<Collection, StoreError>),
}
