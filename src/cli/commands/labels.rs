use crate::errors::AppResult;
use crate::models::ObservationLabel;

pub fn handle() -> AppResult<()> {
    for label in ObservationLabel::ALL {
        println!("{:>2}  {}", label.button_index(), label);
    }
    Ok(())
}
