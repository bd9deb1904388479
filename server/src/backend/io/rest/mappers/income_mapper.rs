use shared::{CreateIncomeRequest, Income};

use crate::backend::domain::{
    commands::incomes::CreateIncomeCommand, models::income::Income as DomainIncome,
};

pub struct IncomeMapper;

impl IncomeMapper {
    pub fn to_dto(income: DomainIncome) -> Income {
        Income {
            id: income.id,
            date: income.date.to_string(),
            source: income.source,
            description: income.description,
            amount: income.amount,
        }
    }

    pub fn to_create_command(request: CreateIncomeRequest) -> CreateIncomeCommand {
        CreateIncomeCommand {
            date: request.date,
            source: request.source,
            description: request.description,
            amount: request.amount,
        }
    }
}
