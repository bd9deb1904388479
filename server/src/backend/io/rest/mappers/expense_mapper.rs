use shared::{CreateExpenseRequest, Expense};

use crate::backend::domain::{
    commands::expenses::CreateExpenseCommand, models::expense::Expense as DomainExpense,
};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(expense: DomainExpense) -> Expense {
        Expense {
            id: expense.id,
            date: expense.date.to_string(),
            category: expense.category,
            description: expense.description,
            amount: expense.amount,
        }
    }

    pub fn to_create_command(request: CreateExpenseRequest) -> CreateExpenseCommand {
        CreateExpenseCommand {
            date: request.date,
            category: request.category,
            description: request.description,
            amount: request.amount,
        }
    }
}
