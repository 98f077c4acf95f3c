mod test_single_connection_joins_room;
