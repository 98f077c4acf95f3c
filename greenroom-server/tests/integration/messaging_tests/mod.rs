mod test_offer_answer_exchange;
